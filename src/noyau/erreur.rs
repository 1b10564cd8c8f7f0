// src/noyau/erreur.rs
//
// Erreurs du noyau.
// Toutes fatales : la première erreur interrompt l’étape en cours, pas de valeur de repli.

use thiserror::Error;

pub type Resultat<T> = Result<T, ErreurCalcul>;

/// Famille d’une erreur (utile pour l’UI et les tests).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Categorie {
    Lexique,
    Syntaxe,
    Arite,
    Malformee,
    SymboleInconnu,
}

impl Categorie {
    pub fn libelle(self) -> &'static str {
        match self {
            Categorie::Lexique => "lexique",
            Categorie::Syntaxe => "syntaxe",
            Categorie::Arite => "arité",
            Categorie::Malformee => "expression",
            Categorie::SymboleInconnu => "symbole",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurCalcul {
    #[error("caractère illégal: '{0}'")]
    CaractereIllegal(char),

    // ex: "1.2.3"
    #[error("nombre invalide: '{0}'")]
    NombreInvalide(String),

    #[error("erreur de syntaxe: {0}")]
    Syntaxe(String),

    #[error("opérandes insuffisants pour '{symbole}' ({trouves} sur {attendus})")]
    OperandesInsuffisants {
        symbole: String,
        attendus: usize,
        trouves: usize,
    },

    /// La pile finale ne contient pas exactement un élément.
    #[error("expression invalide: {restants} élément(s) restant(s) sur la pile")]
    ExpressionMalformee { restants: usize },

    #[error("opérateur inconnu: '{0}'")]
    OperateurInconnu(char),

    #[error("fonction inconnue: {0}")]
    FonctionInconnue(String),
}

impl ErreurCalcul {
    pub fn categorie(&self) -> Categorie {
        use ErreurCalcul::*;

        match self {
            CaractereIllegal(_) | NombreInvalide(_) => Categorie::Lexique,
            Syntaxe(_) => Categorie::Syntaxe,
            OperandesInsuffisants { .. } => Categorie::Arite,
            ExpressionMalformee { .. } => Categorie::Malformee,
            OperateurInconnu(_) | FonctionInconnue(_) => Categorie::SymboleInconnu,
        }
    }

    pub(crate) fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurCalcul::Syntaxe(msg.into())
    }
}

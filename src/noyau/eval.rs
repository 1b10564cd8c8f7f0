//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> valeur (pile de f64)
//!          -> RPN (seconde passe indépendante) -> arbre -> rendu texte / DOT
//!
//! Représentation numérique unique : f64. Les entiers littéraux restent exacts
//! dans les jetons et sont promus ici (au-delà de f64 : ±inf).
//! Domaine : sémantique IEEE-754 (1/0 = inf, sqrt(-1) = NaN), pas d’erreur levée.

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use super::arbre::{format_arbre, format_dot, from_rpn};
use super::erreur::{ErreurCalcul, Resultat};
use super::format::format_valeur;
use super::jetons::{format_tokens, tokenize, Genre, Operateur, Tok};
use super::rpn::to_rpn;

/// Fonctions unaires reconnues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Cotan,
    Exp,
    Sqrt,
}

impl Fonction {
    pub const TOUTES: [Fonction; 6] = [
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Cotan,
        Fonction::Exp,
        Fonction::Sqrt,
    ];

    pub fn depuis_nom(name: &str) -> Resultat<Self> {
        match name {
            "sin" => Ok(Fonction::Sin),
            "cos" => Ok(Fonction::Cos),
            "tan" => Ok(Fonction::Tan),
            "cotan" => Ok(Fonction::Cotan),
            "exp" => Ok(Fonction::Exp),
            "sqrt" => Ok(Fonction::Sqrt),
            _ => Err(ErreurCalcul::FonctionInconnue(name.to_string())),
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Cotan => "cotan",
            Fonction::Exp => "exp",
            Fonction::Sqrt => "sqrt",
        }
    }

    pub fn appliquer(self, x: f64) -> f64 {
        match self {
            Fonction::Sin => x.sin(),
            Fonction::Cos => x.cos(),
            Fonction::Tan => x.tan(),
            // seul le point x = 0 est gardé (pas les autres zéros de tan)
            Fonction::Cotan => {
                if x == 0.0 {
                    f64::INFINITY
                } else {
                    1.0 / x.tan()
                }
            }
            Fonction::Exp => x.exp(),
            Fonction::Sqrt => x.sqrt(),
        }
    }
}

/// `a op b` ; les parenthèses ne sont pas des opérateurs évaluables.
pub fn appliquer_operateur(op: Operateur, a: f64, b: f64) -> Resultat<f64> {
    match op {
        Operateur::Plus => Ok(a + b),
        Operateur::Minus => Ok(a - b),
        Operateur::Star => Ok(a * b),
        Operateur::Slash => Ok(a / b),
        Operateur::Caret => Ok(a.powf(b)),
        Operateur::LPar | Operateur::RPar => Err(ErreurCalcul::OperateurInconnu(op.symbole())),
    }
}

/// Promotion entier exact -> f64.
pub(crate) fn entier_en_f64(n: &BigInt) -> f64 {
    n.to_f64().unwrap_or(f64::INFINITY)
}

/// Évalue une RPN avec une pile de valeurs.
pub fn eval_rpn(rpn: &[Tok]) -> Resultat<f64> {
    let mut pile: Vec<f64> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        match tok {
            Tok::Entier(n) => pile.push(entier_en_f64(n)),
            Tok::Flottant(x) => pile.push(*x),

            Tok::Op(op) => {
                let trouves = pile.len().min(2);
                // b d’abord : le second dépilé est l’opérande gauche
                let (Some(b), Some(a)) = (pile.pop(), pile.pop()) else {
                    return Err(ErreurCalcul::OperandesInsuffisants {
                        symbole: tok.to_string(),
                        attendus: 2,
                        trouves,
                    });
                };
                pile.push(appliquer_operateur(*op, a, b)?);
            }

            Tok::Ident(name) => {
                let Some(x) = pile.pop() else {
                    return Err(ErreurCalcul::OperandesInsuffisants {
                        symbole: name.clone(),
                        attendus: 1,
                        trouves: 0,
                    });
                };
                pile.push(Fonction::depuis_nom(name)?.appliquer(x));
            }
        }
    }

    match pile.as_slice() {
        [v] => Ok(*v),
        _ => Err(ErreurCalcul::ExpressionMalformee {
            restants: pile.len(),
        }),
    }
}

/// Tout ce qu’affiche l’UI pour une expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Calcul {
    pub infixe: String,
    pub jetons: String,
    pub rpn: String,
    pub valeur: f64,

    // arbre (seconde passe)
    pub arbre: String,
    pub dot: String,
    pub valeur_arbre: f64,
}

impl Calcul {
    pub fn valeur_txt(&self, chiffres: usize) -> String {
        format_valeur(self.valeur, chiffres)
    }

    /// Vrai si l’arbre et la RPN donnent la même valeur.
    pub fn arbre_coherent(&self) -> bool {
        proches(self.valeur, self.valeur_arbre)
    }
}

/// Égalité tolérante (relative 1e-9) ; NaN == NaN, inf == inf de même signe.
pub fn proches(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    if a == b {
        return true;
    }
    let echelle = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= 1e-9 * echelle
}

/// Au-delà de ce nombre de noeuds, le rendu texte indenté de l’arbre est omis
/// (sa taille croît avec le carré de la profondeur). Le DOT reste produit.
pub const ARBRE_TEXTE_MAX: usize = 2_000;

/// API publique : évalue une expression infixe.
pub fn eval_expression(expr_str: &str) -> Resultat<Calcul> {
    if expr_str.trim().is_empty() {
        return Err(ErreurCalcul::syntaxe("entrée vide"));
    }

    // 1) Jetons
    let jetons = tokenize(expr_str)?;
    if log::log_enabled!(log::Level::Debug) {
        let nombres = jetons
            .iter()
            .filter(|t| matches!(t.genre(), Genre::Entier | Genre::Flottant))
            .count();
        log::debug!(
            "jetons ({} dont {nombres} nombre(s)): {}",
            jetons.len(),
            format_tokens(&jetons)
        );
    }

    // 2) RPN + valeur
    let rpn = to_rpn(&jetons)?;
    let rpn_txt = format_tokens(&rpn);
    log::debug!("rpn: {rpn_txt}");

    let valeur = eval_rpn(&rpn)?;
    log::debug!("valeur: {valeur}");

    // 3) Arbre : passe indépendante sur les mêmes jetons
    let racine = from_rpn(&to_rpn(&jetons)?)?;
    let valeur_arbre = racine.evaluer()?;

    let taille = racine.taille();
    let arbre = if taille <= ARBRE_TEXTE_MAX {
        format_arbre(&racine)
    } else {
        log::debug!("arbre de {taille} noeuds: rendu texte omis");
        format!("({taille} noeuds, rendu texte omis)")
    };

    let calcul = Calcul {
        infixe: expr_str.to_string(),
        jetons: format_tokens(&jetons),
        rpn: rpn_txt,
        valeur,
        arbre,
        dot: format_dot(&racine),
        valeur_arbre,
    };

    if !calcul.arbre_coherent() {
        log::warn!("arbre et RPN divergent pour {expr_str:?}: {valeur} != {valeur_arbre}");
    }

    Ok(calcul)
}

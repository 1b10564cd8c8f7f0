// src/noyau/jetons.rs
//
// Lexer : chaîne brute -> suite de jetons (matérialisée en entier avant la suite).
// Les blancs sont supprimés AVANT le balayage : "1 2" se lit "12".

use std::fmt;

use num_bigint::BigInt;

use super::erreur::{ErreurCalcul, Resultat};

/// Opérateurs et parenthèses : ensemble fermé.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    LPar,
    RPar,
}

impl Operateur {
    pub fn depuis_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operateur::Plus),
            '-' => Some(Operateur::Minus),
            '*' => Some(Operateur::Star),
            '/' => Some(Operateur::Slash),
            '^' => Some(Operateur::Caret),
            '(' => Some(Operateur::LPar),
            ')' => Some(Operateur::RPar),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Minus => '-',
            Operateur::Star => '*',
            Operateur::Slash => '/',
            Operateur::Caret => '^',
            Operateur::LPar => '(',
            Operateur::RPar => ')',
        }
    }

    /// Vrai pour + - * / ^ (arité 2).
    pub fn est_binaire(self) -> bool {
        !matches!(self, Operateur::LPar | Operateur::RPar)
    }
}

/// Genre d’un jeton.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Genre {
    Entier,
    Flottant,
    Identifiant,
    Operateur,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    // Entier exact : la promotion en f64 se fait à l’évaluation.
    Entier(BigInt),
    Flottant(f64),

    // Nom de fonction (le lexer ne sait pas lesquelles existent).
    Ident(String),

    Op(Operateur),
}

impl Tok {
    pub fn genre(&self) -> Genre {
        match self {
            Tok::Entier(_) => Genre::Entier,
            Tok::Flottant(_) => Genre::Flottant,
            Tok::Ident(_) => Genre::Identifiant,
            Tok::Op(_) => Genre::Operateur,
        }
    }

    pub fn est_op(&self, op: Operateur) -> bool {
        matches!(self, Tok::Op(o) if *o == op)
    }
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Entier(n) => write!(f, "{n}"),
            // Debug garde toujours une partie décimale : 2.0, 0.5
            Tok::Flottant(x) => write!(f, "{x:?}"),
            Tok::Ident(name) => f.write_str(name),
            Tok::Op(op) => write!(f, "{}", op.symbole()),
        }
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - entiers (ex: 12) et décimaux (ex: 1.5, .5, 5.)
/// - identifiants [a-zA-Z]+ (pas de chiffres ni de '_')
/// - opérateurs + - * / ^ et parenthèses ( )
pub fn tokenize(s: &str) -> Resultat<Vec<Tok>> {
    let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    let mut out = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];
        let suivant = chars.get(i + 1).copied();

        // Nombre : chiffre, ou '.' suivi d’un chiffre
        if c.is_ascii_digit() || (c == '.' && suivant.is_some_and(|d| d.is_ascii_digit())) {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let texte: String = chars[start..i].iter().collect();
            out.push(nombre(texte)?);
            continue;
        }

        // Identifiants ASCII : [a-zA-Z]+
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            out.push(Tok::Ident(chars[start..i].iter().collect()));
            continue;
        }

        if let Some(op) = Operateur::depuis_char(c) {
            out.push(Tok::Op(op));
            i += 1;
            continue;
        }

        return Err(ErreurCalcul::CaractereIllegal(c));
    }

    Ok(out)
}

fn nombre(texte: String) -> Resultat<Tok> {
    if texte.contains('.') {
        return match texte.parse::<f64>() {
            Ok(x) => Ok(Tok::Flottant(x)),
            Err(_) => Err(ErreurCalcul::NombreInvalide(texte)),
        };
    }
    match BigInt::parse_bytes(texte.as_bytes(), 10) {
        Some(n) => Ok(Tok::Entier(n)),
        None => Err(ErreurCalcul::NombreInvalide(texte)),
    }
}

/// Liste de jetons en texte, séparés par des espaces (ex: "8 2 3 * -").
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

// src/noyau/rpn.rs
//
// Shunting-yard -> RPN
//
// Règles:
// - Ident(name): fonction unaire, DOIT être suivie de '(' ; on empile l’ident puis '('.
//   Elle sort après la parenthèse fermante de son argument.
// - Opérateurs: on dépile tant que le sommet est un opérateur binaire de précédence >= .
//   Conséquence assumée: '^' est associatif à GAUCHE (2^3^2 = (2^3)^2 = 64).
// - Parenthèses déséquilibrées: erreur de syntaxe (')' orpheline ou '(' jamais fermée).

use super::erreur::{ErreurCalcul, Resultat};
use super::jetons::{Operateur, Tok};

/// Précédence : fonction et '^' = 4 ; '*' '/' = 3 ; '+' '-' = 2 ; le reste = 0.
pub fn precedence(t: &Tok) -> u8 {
    match t {
        Tok::Ident(_) | Tok::Op(Operateur::Caret) => 4,
        Tok::Op(Operateur::Star | Operateur::Slash) => 3,
        Tok::Op(Operateur::Plus | Operateur::Minus) => 2,
        _ => 0,
    }
}

fn est_binaire(t: &Tok) -> bool {
    matches!(t, Tok::Op(op) if op.est_binaire())
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: 8 - 2 * 3 + 7
///   rpn:    8 2 3 * - 7 +
pub fn to_rpn(tokens: &[Tok]) -> Resultat<Vec<Tok>> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    let mut it = tokens.iter();

    while let Some(tok) = it.next() {
        match tok {
            Tok::Entier(_) | Tok::Flottant(_) => out.push(tok.clone()),

            Tok::Ident(name) => match it.next() {
                Some(par @ Tok::Op(Operateur::LPar)) => {
                    ops.push(tok.clone());
                    ops.push(par.clone());
                }
                _ => {
                    return Err(ErreurCalcul::syntaxe(format!(
                        "l’appel de fonction '{name}' doit être suivi de parenthèses"
                    )))
                }
            },

            Tok::Op(Operateur::LPar) => ops.push(tok.clone()),

            Tok::Op(Operateur::RPar) => {
                // dépile jusqu’à '('
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    if top.est_op(Operateur::LPar) {
                        ouvrante = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante {
                    return Err(ErreurCalcul::syntaxe("parenthèse fermante sans ouvrante"));
                }

                // fonction en attente : elle prend ce qui vient d’être fermé comme argument
                if let Some(Tok::Ident(_)) = ops.last() {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }
            }

            Tok::Op(_) => {
                while let Some(top) = ops.last() {
                    if !est_binaire(top) || precedence(top) < precedence(tok) {
                        break;
                    }
                    if let Some(top) = ops.pop() {
                        out.push(top);
                    }
                }
                ops.push(tok.clone());
            }
        }
    }

    // vide la pile ops (ordre LIFO)
    while let Some(op) = ops.pop() {
        if op.est_op(Operateur::LPar) {
            return Err(ErreurCalcul::syntaxe("parenthèse ouvrante non fermée"));
        }
        out.push(op);
    }

    log::trace!("rpn: {} jeton(s) -> {}", tokens.len(), out.len());
    Ok(out)
}

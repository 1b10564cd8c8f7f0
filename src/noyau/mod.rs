//! Noyau RPN
//!
//! Organisation interne :
//! - erreur.rs : taxonomie des erreurs (toutes fatales)
//! - jetons.rs : tokenisation
//! - rpn.rs    : shunting-yard -> RPN
//! - arbre.rs  : RPN -> arbre binaire (+ rendu texte / DOT)
//! - eval.rs   : évaluation de la RPN + pipeline complet
//! - format.rs : affichage des valeurs

pub mod arbre;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod rpn;

#[cfg(test)]
mod tests_exemples;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use eval::eval_expression;

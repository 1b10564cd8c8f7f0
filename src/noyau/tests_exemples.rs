//! Tests bout en bout : exemples de référence + taxonomie des erreurs.
//!
//! Tout passe par `eval_expression` (jetons -> RPN -> valeur, puis arbre).
//! Notes :
//! - '^' est associatif à GAUCHE ici (2^3^2 = 64), comportement observé et assumé.
//! - ')' orpheline et '(' non fermée sont des erreurs de syntaxe explicites.

use super::erreur::{Categorie, ErreurCalcul};
use super::eval::{eval_expression, proches, Calcul};

fn calcul_ok(expr: &str) -> Calcul {
    eval_expression(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_valeur(expr: &str, attendu: f64) {
    let c = calcul_ok(expr);
    assert!(
        proches(c.valeur, attendu),
        "expr={expr:?} valeur={} attendu={attendu}",
        c.valeur
    );
    assert!(c.arbre_coherent(), "arbre incohérent pour expr={expr:?}");
}

fn assert_categorie(expr: &str, attendue: Categorie) -> ErreurCalcul {
    let e = eval_expression(expr).expect_err(expr);
    assert_eq!(e.categorie(), attendue, "expr={expr:?} err={e}");
    e
}

/* ------------------------ Exemples ------------------------ */

#[test]
fn exemple_priorites() {
    let c = calcul_ok("8-2*3+7");
    assert_eq!(c.rpn, "8 2 3 * - 7 +");
    assert_eq!(c.valeur, 9.0);
    assert_eq!(c.valeur_txt(12), "9");
}

#[test]
fn exemple_fonctions() {
    let attendu = 3f64.sqrt() + 8f64.tan() - 1.0 / (4.0 + 0f64.sin());
    assert_valeur("sqrt(3)+tan(4*2)-1/((2^2)+sin(0))", attendu);

    // même chose avec des blancs partout
    assert_valeur("sqrt(3) + tan(4 * 2) - 1 / (( 2 ^ 2 ) + sin(0))", attendu);
}

#[test]
fn exemple_puissance_gauche() {
    let c = calcul_ok("2^3^2");
    assert_eq!(c.rpn, "2 3 ^ 2 ^");
    assert_eq!(c.valeur, 64.0);
    assert_ne!(c.valeur, 512.0);
}

#[test]
fn exemple_fonction_non_fermee() {
    assert_categorie("sin(", Categorie::Syntaxe);
}

#[test]
fn exemple_caractere_illegal() {
    let e = assert_categorie("3 + @", Categorie::Lexique);
    assert_eq!(e, ErreurCalcul::CaractereIllegal('@'));
    assert!(e.to_string().contains('@'));
}

/* ------------------------ Taxonomie ------------------------ */

#[test]
fn erreurs_de_syntaxe() {
    assert_categorie("sin 4", Categorie::Syntaxe);
    assert_categorie("1+2)", Categorie::Syntaxe);
    assert_categorie("((1)", Categorie::Syntaxe);
    assert_categorie("", Categorie::Syntaxe);
}

#[test]
fn erreurs_d_arite() {
    // pas de moins unaire
    assert_categorie("-1", Categorie::Arite);
    assert_categorie("2*", Categorie::Arite);
    assert_categorie("sin()", Categorie::Arite);
}

#[test]
fn expressions_malformees() {
    // deux valeurs restent sur la pile : pas de multiplication implicite
    let e = assert_categorie("2(3)", Categorie::Malformee);
    assert_eq!(e, ErreurCalcul::ExpressionMalformee { restants: 2 });
    assert_categorie("()", Categorie::Malformee);
}

#[test]
fn symboles_inconnus() {
    let e = assert_categorie("ln(2)", Categorie::SymboleInconnu);
    assert_eq!(e, ErreurCalcul::FonctionInconnue("ln".into()));
    // pas de variables
    assert_categorie("x(1)+1", Categorie::SymboleInconnu);
}

#[test]
fn nombre_mal_forme() {
    assert_categorie("1.2.3 + 1", Categorie::Lexique);
}

/* ------------------------ Sémantique numérique ------------------------ */

#[test]
fn division_et_domaine_ieee() {
    assert_valeur("1/0", f64::INFINITY);
    assert_valeur("0-1/0", f64::NEG_INFINITY);
    assert!(calcul_ok("sqrt(0-1)").valeur.is_nan());
    assert_valeur("cotan(0)", f64::INFINITY);
}

#[test]
fn melange_entiers_flottants() {
    assert_valeur("1/2 + .25", 0.75);
    assert_valeur("2.5*4", 10.0);
    assert_valeur("exp(1)", std::f64::consts::E);
    assert_valeur("cos(0)*cotan(1)", 1.0 / 1f64.tan());
}

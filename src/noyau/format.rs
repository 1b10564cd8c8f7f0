// src/noyau/format.rs
//
// Affichage d’une valeur f64 pour l’UI.
// - entier "raisonnable" : sans partie décimale (9, pas 9.0)
// - sinon : `chiffres` décimales max, zéros finaux retirés
// - très grand / très petit : notation scientifique courte

/// Au-delà, un f64 entier n’est plus affiché chiffre à chiffre.
const ENTIER_MAX_AFFICHE: f64 = 1e15;

/// En dessous (hors zéro), on passe en notation scientifique.
const PETIT_MIN_AFFICHE: f64 = 1e-6;

pub fn format_valeur(x: f64, chiffres: usize) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        // pas de "-0"
        return "0".to_string();
    }

    let a = x.abs();
    if a >= ENTIER_MAX_AFFICHE || a < PETIT_MIN_AFFICHE {
        return format!("{x:e}");
    }
    if x.fract() == 0.0 {
        return format!("{x:.0}");
    }

    let mut s = format!("{x:.chiffres$}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

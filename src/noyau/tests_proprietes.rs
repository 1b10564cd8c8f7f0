//! Tests de propriétés : expressions générées (déterministes) + invariants du pipeline.
//!
//! But : marteler jetons -> RPN -> valeur / arbre sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - référence : descente récursive classique, '^' associatif à gauche (comme la RPN)

use std::time::{Duration, Instant};

use super::arbre::from_rpn;
use super::eval::{eval_rpn, proches};
use super::jetons::{tokenize, Tok};
use super::rpn::to_rpn;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => format!("{}{}", 1 + rng.pick(9), rng.pick(10)),
        1 => format!("{}.{}", rng.pick(10), rng.pick(10)),
        2 => format!(".{}", 1 + rng.pick(9)),
        _ => format!("{}", rng.pick(10)),
    }
}

fn gen_blancs(rng: &mut Rng) -> &'static str {
    match rng.pick(4) {
        0 => " ",
        1 => "  ",
        _ => "",
    }
}

/// Expression infixe aléatoire ; `fonctions` autorise sin(...), sqrt(...), etc.
fn gen_expr(rng: &mut Rng, prof: u32, fonctions: bool) -> String {
    if prof == 0 || rng.pick(4) == 0 {
        return gen_nombre(rng);
    }

    let choix = if fonctions { rng.pick(4) } else { rng.pick(3) };
    match choix {
        // binaire SANS parenthèses : la précédence travaille
        0 | 1 => {
            let a = gen_expr(rng, prof - 1, fonctions);
            let b = gen_expr(rng, prof - 1, fonctions);
            let op = ["+", "-", "*", "/", "^"][rng.pick(5) as usize];
            format!("{a}{}{op}{}{b}", gen_blancs(rng), gen_blancs(rng))
        }
        2 => {
            let a = gen_expr(rng, prof - 1, fonctions);
            format!("({}{a})", gen_blancs(rng))
        }
        _ => {
            let a = gen_expr(rng, prof - 1, fonctions);
            let f = ["sin", "cos", "tan", "cotan", "exp", "sqrt"][rng.pick(6) as usize];
            format!("{f}({a})")
        }
    }
}

/* ------------------------ Évaluateur de référence ------------------------ */

struct Reference {
    chars: Vec<char>,
    i: usize,
}

impl Reference {
    fn eval(s: &str) -> f64 {
        let mut r = Reference {
            chars: s.chars().filter(|c| !c.is_whitespace()).collect(),
            i: 0,
        };
        let v = r.somme();
        assert_eq!(r.i, r.chars.len(), "référence: reste non lu dans {s:?}");
        v
    }

    fn courant(&self) -> Option<char> {
        self.chars.get(self.i).copied()
    }

    fn somme(&mut self) -> f64 {
        let mut v = self.produit();
        while let Some(c @ ('+' | '-')) = self.courant() {
            self.i += 1;
            let w = self.produit();
            v = if c == '+' { v + w } else { v - w };
        }
        v
    }

    fn produit(&mut self) -> f64 {
        let mut v = self.puissance();
        while let Some(c @ ('*' | '/')) = self.courant() {
            self.i += 1;
            let w = self.puissance();
            v = if c == '*' { v * w } else { v / w };
        }
        v
    }

    fn puissance(&mut self) -> f64 {
        let mut v = self.atome();
        while let Some('^') = self.courant() {
            self.i += 1;
            v = v.powf(self.atome());
        }
        v
    }

    fn atome(&mut self) -> f64 {
        if self.courant() == Some('(') {
            self.i += 1;
            let v = self.somme();
            assert_eq!(self.courant(), Some(')'));
            self.i += 1;
            return v;
        }
        let start = self.i;
        while let Some(c) = self.courant() {
            if !(c.is_ascii_digit() || c == '.') {
                break;
            }
            self.i += 1;
        }
        let texte: String = self.chars[start..self.i].iter().collect();
        texte
            .parse::<f64>()
            .unwrap_or_else(|_| panic!("référence: nombre {texte:?}"))
    }
}

/* ------------------------ Invariant postfixe ------------------------ */

/// Hauteur finale de pile, ou None si sous-dépassement.
fn simuler_pile(rpn: &[Tok]) -> Option<usize> {
    let mut h: usize = 0;
    for tok in rpn {
        match tok {
            Tok::Entier(_) | Tok::Flottant(_) => h += 1,
            Tok::Ident(_) => {
                if h < 1 {
                    return None;
                }
            }
            Tok::Op(_) => {
                if h < 2 {
                    return None;
                }
                h -= 1;
            }
        }
    }
    Some(h)
}

/* ------------------------ Campagnes ------------------------ */

#[test]
fn prop_rpn_egale_reference() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(0xC0FFEE);

    for _ in 0..1500 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 5, false);
        let rpn = to_rpn(&tokenize(&expr).unwrap()).unwrap();
        let v = eval_rpn(&rpn).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        let attendu = Reference::eval(&expr);

        assert!(proches(v, attendu), "expr={expr:?} rpn={v} ref={attendu}");
    }
}

#[test]
fn prop_invariant_postfixe() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(42);

    for _ in 0..1500 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 5, true);
        let rpn = to_rpn(&tokenize(&expr).unwrap()).unwrap();
        assert_eq!(simuler_pile(&rpn), Some(1), "expr={expr:?}");
    }
}

#[test]
fn prop_relecture_idempotente() {
    let mut rng = Rng::new(7);

    for _ in 0..500 {
        let expr = gen_expr(&mut rng, 4, true);
        assert_eq!(tokenize(&expr), tokenize(&expr), "expr={expr:?}");
    }
}

#[test]
fn prop_arbre_coherent_avec_rpn() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(2024);

    for _ in 0..1500 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 5, true);
        let jetons = tokenize(&expr).unwrap();

        // deux passes indépendantes sur les mêmes jetons
        let v = eval_rpn(&to_rpn(&jetons).unwrap()).unwrap();
        let racine = from_rpn(&to_rpn(&jetons).unwrap()).unwrap();
        let w = racine.evaluer().unwrap();

        assert!(proches(v, w), "expr={expr:?} rpn={v} arbre={w}");
    }
}

#[test]
fn prop_taille_arbre_egale_rpn() {
    let mut rng = Rng::new(99);

    for _ in 0..300 {
        let fonctions = rng.coin();
        let expr = gen_expr(&mut rng, 4, fonctions);
        let rpn = to_rpn(&tokenize(&expr).unwrap()).unwrap();
        let racine = from_rpn(&rpn).unwrap();
        assert_eq!(racine.taille(), rpn.len(), "expr={expr:?}");
    }
}

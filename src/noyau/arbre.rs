// src/noyau/arbre.rs
//
// Arbre d’expression binaire construit depuis une RPN.
// - feuille        : nombre
// - noeud unaire   : fonction (argument dans `gauche`, `droite` vide)
// - noeud binaire  : + - * / ^
//
// Chaque noeud possède ses enfants (Box) : arbre strict, pas de partage.

use std::collections::HashMap;
use std::fmt::Write as _;

use super::erreur::{ErreurCalcul, Resultat};
use super::eval::{appliquer_operateur, entier_en_f64, Fonction};
use super::jetons::{Operateur, Tok};

#[derive(Debug)]
pub struct Noeud {
    jeton: Tok,
    gauche: Option<Box<Noeud>>,
    droite: Option<Box<Noeud>>,
}

impl Noeud {
    pub fn feuille(jeton: Tok) -> Self {
        Self {
            jeton,
            gauche: None,
            droite: None,
        }
    }

    pub fn unaire(jeton: Tok, argument: Noeud) -> Self {
        Self {
            jeton,
            gauche: Some(Box::new(argument)),
            droite: None,
        }
    }

    pub fn binaire(jeton: Tok, gauche: Noeud, droite: Noeud) -> Self {
        Self {
            jeton,
            gauche: Some(Box::new(gauche)),
            droite: Some(Box::new(droite)),
        }
    }

    pub fn jeton(&self) -> &Tok {
        &self.jeton
    }

    pub fn gauche(&self) -> Option<&Noeud> {
        self.gauche.as_deref()
    }

    pub fn droite(&self) -> Option<&Noeud> {
        self.droite.as_deref()
    }

    /// Nombre total de noeuds.
    pub fn taille(&self) -> usize {
        let mut n = 0;
        self.parcours(&mut |_, _| n += 1);
        n
    }

    /// Parcours en profondeur (préfixe) : `visite(noeud, parent)`.
    /// Pile explicite : la profondeur de l’arbre ne consomme pas la pile d’appels.
    pub fn parcours<'a>(&'a self, visite: &mut impl FnMut(&'a Noeud, Option<&'a Noeud>)) {
        let mut pile: Vec<(&'a Noeud, Option<&'a Noeud>)> = vec![(self, None)];

        while let Some((n, parent)) = pile.pop() {
            visite(n, parent);
            // droite d’abord : la gauche sort en premier
            if let Some(d) = n.droite() {
                pile.push((d, Some(n)));
            }
            if let Some(g) = n.gauche() {
                pile.push((g, Some(n)));
            }
        }
    }

    /// Évaluation de l’arbre (mêmes règles que l’évaluateur RPN), en post-ordre itératif.
    pub fn evaluer(&self) -> Resultat<f64> {
        enum Etape<'a> {
            Visiter(&'a Noeud),
            Fonction(Fonction),
            Operateur(Operateur, &'a Noeud),
        }

        let mut travail = vec![Etape::Visiter(self)];
        let mut valeurs: Vec<f64> = Vec::new();

        while let Some(etape) = travail.pop() {
            match etape {
                Etape::Visiter(n) => match &n.jeton {
                    Tok::Entier(e) => valeurs.push(entier_en_f64(e)),
                    Tok::Flottant(x) => valeurs.push(*x),

                    Tok::Ident(name) => {
                        let f = Fonction::depuis_nom(name)?;
                        let g = n.enfant(n.gauche(), 1, 0)?;
                        travail.push(Etape::Fonction(f));
                        travail.push(Etape::Visiter(g));
                    }

                    Tok::Op(op) => {
                        let g = n.enfant(n.gauche(), 2, 0)?;
                        let d = n.enfant(n.droite(), 2, 1)?;
                        travail.push(Etape::Operateur(*op, n));
                        travail.push(Etape::Visiter(d));
                        travail.push(Etape::Visiter(g));
                    }
                },

                Etape::Fonction(f) => {
                    let Some(x) = valeurs.pop() else {
                        return Err(ErreurCalcul::ExpressionMalformee { restants: 0 });
                    };
                    valeurs.push(f.appliquer(x));
                }

                Etape::Operateur(op, n) => {
                    let trouves = valeurs.len().min(2);
                    let (Some(b), Some(a)) = (valeurs.pop(), valeurs.pop()) else {
                        return Err(ErreurCalcul::OperandesInsuffisants {
                            symbole: n.jeton.to_string(),
                            attendus: 2,
                            trouves,
                        });
                    };
                    valeurs.push(appliquer_operateur(op, a, b)?);
                }
            }
        }

        match valeurs.as_slice() {
            [v] => Ok(*v),
            _ => Err(ErreurCalcul::ExpressionMalformee {
                restants: valeurs.len(),
            }),
        }
    }

    fn enfant<'a>(
        &self,
        n: Option<&'a Noeud>,
        attendus: usize,
        trouves: usize,
    ) -> Resultat<&'a Noeud> {
        n.ok_or_else(|| ErreurCalcul::OperandesInsuffisants {
            symbole: self.jeton.to_string(),
            attendus,
            trouves,
        })
    }
}

// Libération itérative : un arbre très profond ne doit pas épuiser la pile.
impl Drop for Noeud {
    fn drop(&mut self) {
        let mut pile: Vec<Box<Noeud>> = Vec::new();
        pile.extend(self.gauche.take());
        pile.extend(self.droite.take());

        while let Some(mut n) = pile.pop() {
            pile.extend(n.gauche.take());
            pile.extend(n.droite.take());
        }
    }
}

/// Construit l’arbre depuis une RPN.
pub fn from_rpn(rpn: &[Tok]) -> Resultat<Noeud> {
    let mut st: Vec<Noeud> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Entier(_) | Tok::Flottant(_) => st.push(Noeud::feuille(tok)),

            Tok::Op(op) if !op.est_binaire() => {
                return Err(ErreurCalcul::OperateurInconnu(op.symbole()))
            }

            Tok::Op(_) => {
                let trouves = st.len().min(2);
                let (Some(b), Some(a)) = (st.pop(), st.pop()) else {
                    return Err(ErreurCalcul::OperandesInsuffisants {
                        symbole: tok.to_string(),
                        attendus: 2,
                        trouves,
                    });
                };
                st.push(Noeud::binaire(tok, a, b));
            }

            Tok::Ident(_) => {
                let Some(x) = st.pop() else {
                    return Err(ErreurCalcul::OperandesInsuffisants {
                        symbole: tok.to_string(),
                        attendus: 1,
                        trouves: 0,
                    });
                };
                st.push(Noeud::unaire(tok, x));
            }
        }
    }

    match st.pop() {
        Some(racine) if st.is_empty() => Ok(racine),
        Some(_) => Err(ErreurCalcul::ExpressionMalformee {
            restants: st.len() + 1,
        }),
        None => Err(ErreurCalcul::ExpressionMalformee { restants: 0 }),
    }
}

/// Rendu texte indenté (un noeud par ligne).
pub fn format_arbre(racine: &Noeud) -> String {
    let mut out = String::new();
    let mut pile: Vec<(&Noeud, usize)> = vec![(racine, 0)];

    while let Some((n, prof)) = pile.pop() {
        for _ in 0..prof {
            out.push_str("│ ");
        }
        let _ = writeln!(out, "{}", n.jeton());
        if let Some(d) = n.droite() {
            pile.push((d, prof + 1));
        }
        if let Some(g) = n.gauche() {
            pile.push((g, prof + 1));
        }
    }

    out.truncate(out.trim_end().len());
    out
}

/// Source Graphviz (DOT) : un noeud étiqueté par noeud d’arbre, une arête parent -> enfant.
pub fn format_dot(racine: &Noeud) -> String {
    let mut ids: HashMap<*const Noeud, usize> = HashMap::new();
    let mut out = String::from("digraph {\n");

    racine.parcours(&mut |n, parent| {
        let id = ids.len();
        ids.insert(n as *const Noeud, id);

        let label = n.jeton().to_string().replace('"', "\\\"");
        let _ = writeln!(out, "    n{id} [label=\"{label}\"];");

        if let Some(p) = parent.and_then(|p| ids.get(&(p as *const Noeud))) {
            let _ = writeln!(out, "    n{p} -> n{id};");
        }
    });

    out.push('}');
    out
}

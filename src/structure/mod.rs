//! In-memory macromolecular structure: atoms grouped into residues grouped
//! into chains.
//!
//! Ownership flows downward ([`Model`] → [`Chain`] → [`Residue`] →
//! [`Atom`]). Upward relations are plain indices: a residue stores the index
//! of its chain within the model, an atom stores the index of its residue
//! within the chain. The graph is built once through [`ModelBuilder`] and is
//! read-only afterwards.

mod pdb;

use glam::DVec3;
pub use pdb::{load, load_from_reader, StructureFormat};

use crate::error::RibbonError;

/// Atom names that stand in for the alpha carbon when tracing a backbone,
/// in priority order.
const BACKBONE_ATOM_NAMES: [&str; 2] = ["CA", "P"];

/// A single atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Atom name as written in the structure file (e.g. `CA`).
    pub name: String,
    /// Element symbol, empty when the file does not record one.
    pub element: String,
    /// Cartesian position in the file's units (ångström).
    pub position: DVec3,
    /// Index of the owning residue within its chain.
    pub residue: usize,
}

/// An ordered group of atoms forming one monomer.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    /// Three-letter residue name (e.g. `ALA`).
    pub name: String,
    /// Sequence number from the structure file.
    pub sequence_index: isize,
    /// Index of the owning chain within the model.
    pub chain: usize,
    atoms: Vec<Atom>,
}

impl Residue {
    /// Atoms in file order.
    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Look up an atom by name.
    #[must_use]
    pub fn atom(&self, name: &str) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.name == name)
    }

    /// Position of the backbone trace atom (alpha carbon, or phosphorus for
    /// nucleotides), if the residue has one.
    #[must_use]
    pub fn backbone_position(&self) -> Option<DVec3> {
        BACKBONE_ATOM_NAMES
            .iter()
            .find_map(|name| self.atom(name))
            .map(|a| a.position)
    }
}

/// A backbone anchor derived from a residue, in chain order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Backbone atom position.
    pub position: DVec3,
    /// Index of the residue the point was taken from.
    pub residue_index: usize,
}

/// An ordered sequence of residues. Sequence order defines the traversal
/// order of the ribbon.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    /// Chain identifier from the structure file (e.g. `A`).
    pub id: String,
    /// Index of this chain within the model.
    pub index: usize,
    residues: Vec<Residue>,
}

impl Chain {
    /// Residues in sequence order.
    #[must_use]
    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    /// Total number of atoms over all residues.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.residues.iter().map(|r| r.atoms.len()).sum()
    }

    /// Backbone control points in sequence order. Residues without a
    /// backbone atom are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RibbonError::InsufficientControlPoints`] when fewer than two
    /// residues carry a backbone atom.
    pub fn control_points(&self) -> Result<Vec<ControlPoint>, RibbonError> {
        let points: Vec<ControlPoint> = self
            .residues
            .iter()
            .enumerate()
            .filter_map(|(residue_index, residue)| {
                residue.backbone_position().map(|position| ControlPoint {
                    position,
                    residue_index,
                })
            })
            .collect();

        if points.len() < 2 {
            return Err(RibbonError::InsufficientControlPoints {
                chain: self.id.clone(),
                found: points.len(),
            });
        }
        Ok(points)
    }
}

/// Root of a parsed structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    chains: Vec<Chain>,
}

impl Model {
    /// Chains in file order.
    #[must_use]
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Number of residues across all chains.
    #[must_use]
    pub fn residue_count(&self) -> usize {
        self.chains.iter().map(|c| c.residues.len()).sum()
    }

    /// Number of atoms across all chains.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.chains.iter().map(Chain::atom_count).sum()
    }

    /// Iterate every atom in chain, residue, atom order.
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.chains
            .iter()
            .flat_map(|c| c.residues.iter())
            .flat_map(|r| r.atoms.iter())
    }

    /// The residue an atom belongs to, resolved through the atom's
    /// back-reference within `chain`.
    #[must_use]
    pub fn residue_of(&self, chain: usize, atom: &Atom) -> Option<&Residue> {
        self.chains.get(chain)?.residues.get(atom.residue)
    }

    /// The chain a residue belongs to.
    #[must_use]
    pub fn chain_of(&self, residue: &Residue) -> Option<&Chain> {
        self.chains.get(residue.chain)
    }
}

/// Incremental constructor that keeps back-references consistent.
///
/// ```
/// use glam::DVec3;
/// use ribbon::structure::ModelBuilder;
///
/// let mut builder = ModelBuilder::new();
/// builder.begin_chain("A");
/// builder.begin_residue("GLY", 1);
/// builder.add_atom("CA", "C", DVec3::ZERO);
/// let model = builder.finish();
/// assert_eq!(model.atom_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ModelBuilder {
    chains: Vec<Chain>,
}

impl ModelBuilder {
    /// Empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new chain; subsequent residues are appended to it.
    pub fn begin_chain(&mut self, id: &str) -> &mut Self {
        let index = self.chains.len();
        self.chains.push(Chain {
            id: id.to_owned(),
            index,
            residues: Vec::new(),
        });
        self
    }

    /// Start a new residue in the current chain, opening an unnamed chain
    /// if none is open.
    pub fn begin_residue(
        &mut self,
        name: &str,
        sequence_index: isize,
    ) -> &mut Self {
        if self.chains.is_empty() {
            let _ = self.begin_chain("");
        }
        let chain_index = self.chains.len() - 1;
        if let Some(chain) = self.chains.last_mut() {
            chain.residues.push(Residue {
                name: name.to_owned(),
                sequence_index,
                chain: chain_index,
                atoms: Vec::new(),
            });
        }
        self
    }

    /// Append an atom to the current residue, opening an unnamed residue if
    /// none is open.
    pub fn add_atom(
        &mut self,
        name: &str,
        element: &str,
        position: DVec3,
    ) -> &mut Self {
        let needs_residue = self
            .chains
            .last()
            .is_none_or(|c| c.residues.is_empty());
        if needs_residue {
            let _ = self.begin_residue("", 0);
        }
        if let Some(chain) = self.chains.last_mut() {
            let residue_index = chain.residues.len() - 1;
            if let Some(residue) = chain.residues.last_mut() {
                residue.atoms.push(Atom {
                    name: name.to_owned(),
                    element: element.to_owned(),
                    position,
                    residue: residue_index,
                });
            }
        }
        self
    }

    /// Convenience: a chain made of one `CA` atom per position.
    pub fn add_ca_trace(&mut self, id: &str, positions: &[DVec3]) -> &mut Self {
        let _ = self.begin_chain(id);
        for (i, &pos) in positions.iter().enumerate() {
            let _ = self
                .begin_residue("GLY", i as isize + 1)
                .add_atom("CA", "C", pos);
        }
        self
    }

    /// Finish building.
    #[must_use]
    pub fn finish(self) -> Model {
        Model {
            chains: self.chains,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_chain_model() -> Model {
        let mut b = ModelBuilder::new();
        let _ = b.begin_chain("A");
        let _ = b
            .begin_residue("ALA", 1)
            .add_atom("N", "N", DVec3::new(-1.0, 0.0, 0.0))
            .add_atom("CA", "C", DVec3::ZERO)
            .add_atom("C", "C", DVec3::new(1.0, 0.0, 0.0));
        let _ = b
            .begin_residue("GLY", 2)
            .add_atom("CA", "C", DVec3::new(3.8, 0.0, 0.0));
        let _ = b.begin_residue("HOH", 3).add_atom("O", "O", DVec3::ONE);
        let _ = b.begin_chain("B");
        let _ = b.begin_residue("DA", 1).add_atom("P", "P", DVec3::Z);
        b.finish()
    }

    #[test]
    fn counts() {
        let model = two_chain_model();
        assert_eq!(model.chains().len(), 2);
        assert_eq!(model.residue_count(), 4);
        assert_eq!(model.atom_count(), 6);
        assert_eq!(model.atoms().count(), 6);
    }

    #[test]
    fn back_references_resolve() {
        let model = two_chain_model();
        let chain_b = &model.chains()[1];
        let residue = &chain_b.residues()[0];
        assert_eq!(model.chain_of(residue).map(|c| c.id.as_str()), Some("B"));

        let chain_a = &model.chains()[0];
        let atom = &chain_a.residues()[1].atoms()[0];
        let owner = model.residue_of(chain_a.index, atom).unwrap();
        assert_eq!(owner.name, "GLY");
    }

    #[test]
    fn backbone_prefers_alpha_carbon_then_phosphorus() {
        let model = two_chain_model();
        let ala = &model.chains()[0].residues()[0];
        assert_eq!(ala.backbone_position(), Some(DVec3::ZERO));
        let da = &model.chains()[1].residues()[0];
        assert_eq!(da.backbone_position(), Some(DVec3::Z));
        let water = &model.chains()[0].residues()[2];
        assert_eq!(water.backbone_position(), None);
    }

    #[test]
    fn control_points_skip_residues_without_backbone() {
        let model = two_chain_model();
        let points = model.chains()[0].control_points().unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].residue_index, 0);
        assert_eq!(points[1].residue_index, 1);
        assert_eq!(points[1].position, DVec3::new(3.8, 0.0, 0.0));
    }

    #[test]
    fn single_residue_chain_is_insufficient() {
        let model = two_chain_model();
        match model.chains()[1].control_points() {
            Err(RibbonError::InsufficientControlPoints { chain, found }) => {
                assert_eq!(chain, "B");
                assert_eq!(found, 1);
            }
            other => panic!("expected InsufficientControlPoints, got {other:?}"),
        }
    }

    #[test]
    fn empty_chain_is_insufficient() {
        let mut b = ModelBuilder::new();
        let _ = b.begin_chain("Z");
        let model = b.finish();
        assert!(model.chains()[0].control_points().is_err());
    }

    #[test]
    fn atoms_without_open_residue_get_one() {
        let mut b = ModelBuilder::new();
        let _ = b.add_atom("CA", "C", DVec3::X);
        let model = b.finish();
        assert_eq!(model.chains().len(), 1);
        assert_eq!(model.chains()[0].residues().len(), 1);
        assert_eq!(model.chains()[0].residues()[0].chain, 0);
    }
}

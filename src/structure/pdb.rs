//! Structure file loading through `pdbtbx`.
//!
//! Only the first model of multi-model files is read. Residue and atom
//! order follow the file.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use glam::DVec3;
use pdbtbx::{Format, ReadOptions, StrictnessLevel, PDB};

use super::{Model, ModelBuilder};
use crate::error::RibbonError;

/// Supported structure file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFormat {
    /// Fixed-column PDB.
    Pdb,
    /// mmCIF / PDBx.
    Mmcif,
}

impl StructureFormat {
    /// Guess the format from a file extension (`.cif`/`.mmcif` → mmCIF,
    /// anything else → PDB).
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("cif" | "mmcif") => Self::Mmcif,
            _ => Self::Pdb,
        }
    }

    fn to_pdbtbx(self) -> Format {
        match self {
            Self::Pdb => Format::Pdb,
            Self::Mmcif => Format::Mmcif,
        }
    }
}

/// Load a structure file, choosing the format from its extension.
///
/// # Errors
///
/// Returns [`RibbonError::Io`] if the file cannot be opened and
/// [`RibbonError::StructureLoad`] if it cannot be parsed or holds no chains.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Model, RibbonError> {
    let path = path.as_ref();
    let format = StructureFormat::from_path(path);
    let file = File::open(path)?;
    let model = load_from_reader(file, format)?;
    log::info!(
        "loaded {}: {} atoms, {} residues, {} chains",
        path.display(),
        model.atom_count(),
        model.residue_count(),
        model.chains().len()
    );
    Ok(model)
}

/// Load a structure from any seekable reader in an explicit format.
///
/// # Errors
///
/// Returns [`RibbonError::StructureLoad`] if the input cannot be parsed or
/// holds no chains.
pub fn load_from_reader<R: Read + Seek>(
    reader: R,
    format: StructureFormat,
) -> Result<Model, RibbonError> {
    let (pdb, warnings) = ReadOptions::default()
        .set_format(format.to_pdbtbx())
        .set_level(StrictnessLevel::Loose)
        .read_raw(BufReader::new(reader))
        .map_err(|errors| {
            let messages: Vec<String> =
                errors.iter().map(ToString::to_string).collect();
            RibbonError::StructureLoad(messages.join("; "))
        })?;
    for warning in &warnings {
        log::debug!("structure parse warning: {warning}");
    }
    from_pdb(&pdb)
}

/// Convert a parsed `pdbtbx` structure into a [`Model`].
fn from_pdb(pdb: &PDB) -> Result<Model, RibbonError> {
    let first = pdb.models().next().ok_or_else(|| {
        RibbonError::StructureLoad("structure contains no models".to_owned())
    })?;

    let mut builder = ModelBuilder::new();
    let mut chain_count = 0usize;
    for chain in first.chains() {
        let _ = builder.begin_chain(chain.id());
        chain_count += 1;
        for residue in chain.residues() {
            let _ = builder.begin_residue(
                residue.name().unwrap_or("UNK"),
                residue.serial_number(),
            );
            for atom in residue.atoms() {
                let element = atom
                    .element()
                    .map(|e| e.symbol().to_owned())
                    .unwrap_or_default();
                let _ = builder.add_atom(
                    atom.name().trim(),
                    &element,
                    DVec3::new(atom.x(), atom.y(), atom.z()),
                );
            }
        }
    }

    if chain_count == 0 {
        return Err(RibbonError::StructureLoad(
            "structure contains no chains".to_owned(),
        ));
    }
    Ok(builder.finish())
}

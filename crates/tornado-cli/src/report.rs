use std::io::{self, Write};
use tornado::core::models::traits::{HasAtoms, HasBonds, HasResidueSequence};
use tornado::workflows::analyze::{MoleculeAnalysis, StructureAnalysis};

/// Writes a human-readable summary of `analysis`, one block per molecule.
pub fn write_report(out: &mut impl Write, analysis: &StructureAnalysis) -> io::Result<()> {
    writeln!(
        out,
        "Analyzed {} molecule(s): {} atoms, {} bonds, {} base pairs, {} duplexes",
        analysis.molecules.len(),
        analysis.atom_count(),
        analysis.bond_count(),
        analysis.base_pair_count(),
        analysis.duplex_count()
    )?;
    for result in &analysis.molecules {
        write_molecule(out, result)?;
    }
    Ok(())
}

fn write_molecule(out: &mut impl Write, result: &MoleculeAnalysis) -> io::Result<()> {
    let molecule = &result.molecule;
    writeln!(
        out,
        "\nMolecule '{}' ({}): {} residues, {} atoms, {} bonds (dictionary {}, linkage {}, distance {})",
        molecule.chain_id,
        molecule.kind(),
        molecule.residue_count(),
        molecule.atom_count(),
        molecule.bond_count(),
        result.dictionary_bonds,
        result.linkage_bonds,
        result.distance_bonds
    )?;
    if !molecule.kind().is_nucleic_acid() {
        return Ok(());
    }

    let labels: Vec<String> = result
        .base_pairs
        .iter()
        .map(|pair| pair.label(molecule))
        .collect();
    writeln!(out, "  Base pairs ({}): {}", labels.len(), labels.join(" "))?;

    for (i, report) in result.duplexes.iter().enumerate() {
        writeln!(
            out,
            "  Duplex {}: {} base pairs over {} residues",
            i + 1,
            report.duplex.len(),
            report.duplex.residues().count()
        )?;
        match &report.geometry {
            Some(geometry) => {
                let o = geometry.axis.origin;
                let d = geometry.axis.direction;
                writeln!(
                    out,
                    "    axis origin ({:.3}, {:.3}, {:.3}) direction ({:.3}, {:.3}, {:.3}), length {:.2} Å, radius {:.2} Å",
                    o.x,
                    o.y,
                    o.z,
                    d.x,
                    d.y,
                    d.z,
                    geometry.length(),
                    geometry.cylinder.radius
                )?;
            }
            None => writeln!(out, "    geometry unavailable")?,
        }
    }
    Ok(())
}

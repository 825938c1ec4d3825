//! Synthetic structures shared by unit tests.

use crate::core::io::records::AtomRecord;
use crate::core::models::builder::StructureBuilder;
use crate::core::models::molecule::Molecule;
use crate::core::topology::registry::ResidueRegistry;
use nalgebra::Point3;

/// Rise between stacked base pairs.
pub(crate) const RISE: f64 = 3.4;
/// Residue number that pairs with residue 1.
pub(crate) const PARTNER_OF_FIRST: i32 = 20;

const RING_RADIUS: f64 = 1.4;
const BASE_CENTER_X: f64 = 2.9;
const C1_X: f64 = 5.3;
const C1_Y: f64 = 1.0;

/// Ring atoms by angle around the base center, in degrees.
const RING: [(f64, &str, &str); 6] = [
    (0.0, " N3 ", "N"),
    (60.0, " C4 ", "C"),
    (120.0, " C5 ", "C"),
    (180.0, " N1 ", "N"),
    (240.0, " C6 ", "C"),
    (300.0, " C2 ", "C"),
];

/// One base ring plus its C1' atom, centered at `center` and tilted by `tilt`
/// degrees about the x axis through that center.
fn base_records(residue: &str, number: i32, center: Point3<f64>, c1_x: f64, tilt: f64) -> Vec<AtomRecord> {
    let (sin, cos) = tilt.to_radians().sin_cos();
    let place = |dx: f64, dy: f64| Point3::new(center.x + dx, center.y + dy * cos, center.z + dy * sin);
    let mut records: Vec<AtomRecord> = RING
        .iter()
        .map(|&(degrees, name, element)| {
            let theta = degrees.to_radians();
            let position = place(RING_RADIUS * theta.cos(), RING_RADIUS * theta.sin());
            AtomRecord::new(name, residue, number, position)
                .with_chain('A')
                .with_element(element)
        })
        .collect();
    records.push(
        AtomRecord::new(" C1'", residue, number, place(c1_x - center.x, C1_Y))
            .with_chain('A')
            .with_element("C"),
    );
    records
}

/// Atom records for an idealized antiparallel duplex of `pairs` flat base pairs.
///
/// Base pair `k` lies in the plane `z = k * RISE` and joins residue `k + 1` (an
/// adenylate on the left) with residue `PARTNER_OF_FIRST - k` (a uridylate on the
/// right). The closest N-N contact across each pair is 3.0 Å. Records are emitted in
/// chain order: the first strand ascending, then the second strand ascending.
pub(crate) fn duplex_records(pairs: usize) -> Vec<AtomRecord> {
    tilted_duplex_records(&vec![0.0; pairs])
}

/// Like [`duplex_records`], with both bases of pair `k` tilted by `tilts[k]` degrees
/// about the x axis. The N-N contact sits on that axis and is unchanged.
pub(crate) fn tilted_duplex_records(tilts: &[f64]) -> Vec<AtomRecord> {
    let mut first = Vec::new();
    let mut second = Vec::new();
    for (k, &tilt) in tilts.iter().enumerate() {
        let z = k as f64 * RISE;
        first.extend(base_records(
            "A",
            k as i32 + 1,
            Point3::new(-BASE_CENTER_X, 0.0, z),
            -C1_X,
            tilt,
        ));
        second.push(base_records(
            "U",
            PARTNER_OF_FIRST - k as i32,
            Point3::new(BASE_CENTER_X, 0.0, z),
            C1_X,
            tilt,
        ));
    }
    second.reverse();
    first.extend(second.into_iter().flatten());
    first
}

/// A single A1:U20 candidate pair: the adenylate centered at `(-2.9, 0, 0)`, the
/// uridylate at `(2.9, 0, lift)`. Each base is tilted about the x axis through its own
/// center, which leaves the N3-N1 contact on that axis.
pub(crate) fn pair_records(left_tilt: f64, right_tilt: f64, lift: f64) -> Vec<AtomRecord> {
    let mut records = base_records(
        "A",
        1,
        Point3::new(-BASE_CENTER_X, 0.0, 0.0),
        -C1_X,
        left_tilt,
    );
    records.extend(base_records(
        "U",
        PARTNER_OF_FIRST,
        Point3::new(BASE_CENTER_X, 0.0, lift),
        C1_X,
        right_tilt,
    ));
    records
}

/// Assembles records that form a single molecule.
pub(crate) fn molecule_from(records: &[AtomRecord]) -> Molecule {
    let registry = ResidueRegistry::standard();
    let mut builder = StructureBuilder::new(&registry);
    builder.extend(records);
    builder
        .build()
        .pop()
        .expect("test records always form one molecule")
}

/// The duplex of [`duplex_records`] assembled into a single molecule.
pub(crate) fn duplex_molecule(pairs: usize) -> Molecule {
    molecule_from(&duplex_records(pairs))
}

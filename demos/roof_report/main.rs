//! Roof report: builds a few sample roofs and prints what they are made of.
//!
//! Usage:
//! ```text
//! cargo run --example roof_report                 # every sample
//! cargo run --example roof_report -- corner       # one sample
//! RUST_LOG=roofgen=debug cargo run --example roof_report
//! ```

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use roofgen::emit::{draft, material, EmitRoof, EmitSettings};
use roofgen::geometry::EdgeKind;
use roofgen::math::Point2;
use roofgen::operations::boolean::{BooleanOp, Cutter};
use roofgen::roof::{ConstraintType, RoofGenerator, RoofPart, RoofSettings};
use roofgen::Result;

fn straight() -> Result<RoofGenerator> {
    RoofGenerator::from_parts(RoofSettings::default(), &[RoofPart::default()])
}

fn corner() -> Result<RoofGenerator> {
    RoofGenerator::from_parts(
        RoofSettings::default(),
        &[
            RoofPart::default(),
            RoofPart {
                bound_idx: 1,
                a0: FRAC_PI_2,
                ..RoofPart::default()
            },
        ],
    )
}

fn hipped() -> Result<RoofGenerator> {
    RoofGenerator::from_parts(
        RoofSettings::default(),
        &[
            RoofPart {
                triangular_end: true,
                ..RoofPart::default()
            },
            RoofPart {
                bound_idx: 1,
                a0: FRAC_PI_2,
                triangular_end: true,
                ..RoofPart::default()
            },
        ],
    )
}

fn sloped() -> Result<RoofGenerator> {
    RoofGenerator::from_parts(
        RoofSettings::default(),
        &[
            RoofPart::default(),
            RoofPart {
                bound_idx: 1,
                a0: FRAC_PI_4,
                length: 2.0,
                constraint_type: ConstraintType::Slope,
                ..RoofPart::default()
            },
        ],
    )
}

fn report(name: &str, mut roof: RoofGenerator, with_hole: bool) -> Result<()> {
    roof.make_roof()?;
    if with_hole {
        let hole = Cutter::from_points(
            &[
                Point2::new(1.0, 1.0),
                Point2::new(2.0, 1.0),
                Point2::new(2.0, 2.0),
                Point2::new(1.0, 2.0),
            ],
            EdgeKind::Side,
            BooleanOp::Difference,
        );
        roof.cut(&[hole])?;
    }

    println!("== {name} ==");
    for (i, (_, pan)) in roof.pitches().enumerate() {
        let kinds: Vec<String> = pan.segs.iter().map(|e| format!("{:?}", e.kind)).collect();
        println!(
            "  pitch {i} {:?}: slope {:.3} width {:.3} holes {} [{}]",
            pan.side,
            pan.slope,
            pan.width,
            pan.holes.len(),
            kinds.join(", ")
        );
    }

    let lines = draft(&roof);
    println!("  draft: {} verts, {} edges", lines.verts.len(), lines.edges.len());

    let mesh = EmitRoof::new(EmitSettings::default()).execute(&roof)?;
    let tiles: usize = (0..material::TILE_VARIANTS)
        .map(|k| mesh.count_material(material::TILE + k))
        .sum();
    println!(
        "  mesh: {} verts, {} faces (tiles {}, hips {}, fascia {}, rafters {})",
        mesh.verts.len(),
        mesh.faces.len(),
        tiles,
        mesh.count_material(material::HIP),
        mesh.count_material(material::FASCIA),
        mesh.count_material(material::RAFTER),
    );
    Ok(())
}

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for roofgen.
    // Override with RUST_LOG env var (e.g. RUST_LOG=roofgen=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("roofgen=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let wanted = std::env::args().nth(1);
    let samples: [(&str, fn() -> Result<RoofGenerator>, bool); 5] = [
        ("straight", straight, false),
        ("corner", corner, false),
        ("hipped", hipped, false),
        ("sloped", sloped, false),
        ("skylight", straight, true),
    ];
    for (name, build, with_hole) in samples {
        if wanted.as_deref().is_some_and(|w| w != name) {
            continue;
        }
        report(name, build()?, with_hole)?;
    }
    Ok(())
}

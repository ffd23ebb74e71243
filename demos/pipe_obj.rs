//! Builds a bent tube and writes it to stdout as Wavefront OBJ.
//!
//! Usage:
//! ```text
//! cargo run --example pipe_obj > pipe.obj                 # standard 88° bend
//! cargo run --example pipe_obj -- 45 > pipe.obj           # bend angle
//! cargo run --example pipe_obj -- 45 stainless > pipe.obj # bend angle, material
//! ```

use std::error::Error;
use std::io::{self, BufWriter, Write};

use pipebend::{Material, PipeContext, PipeParams};

fn main() -> Result<(), Box<dyn Error>> {
    // Default: WARN for everything, INFO for pipebend.
    // Override with RUST_LOG env var (e.g. RUST_LOG=pipebend=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("pipebend=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let mut params = PipeParams::default();
    if let Some(angle) = args.next() {
        params = params.with_bend_angle(angle.parse()?).clamped();
    }
    let material: Material = match args.next() {
        Some(label) => label.parse()?,
        None => Material::default(),
    };

    let ctx = PipeContext::new(params)?;
    let mesh = ctx.model().to_mesh();
    let optical = material.optical();

    let mut out = BufWriter::new(io::stdout().lock());
    writeln!(out, "# {material} tube, {} triangles", mesh.triangle_count())?;
    writeln!(
        out,
        "# color #{:02x}{:02x}{:02x} metalness {} roughness {}",
        optical.color[0], optical.color[1], optical.color[2], optical.metalness, optical.roughness
    )?;
    for v in &mesh.vertices {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for n in &mesh.normals {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for [a, b, c] in &mesh.indices {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }
    out.flush()?;
    Ok(())
}

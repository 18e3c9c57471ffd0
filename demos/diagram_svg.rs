use plotters::prelude::*;
use rand::Rng;
use vorotwo::{BoundingBox, Tessellation};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bounds = BoundingBox::new([0.0, 0.0], [100.0, 100.0]);
    let mut tess = Tessellation::new(bounds);

    let mut rng = rand::thread_rng();
    let mut generators = Vec::with_capacity(500 * 2);
    for _ in 0..500 {
        generators.push(rng.gen_range(0.0..100.0));
        generators.push(rng.gen_range(0.0..100.0));
    }
    tess.set_generators(&generators);
    tess.calculate()?;
    render("2d_voronoi.svg", &tess)?;

    for _ in 0..10 {
        tess.relax()?;
        tess.calculate()?;
    }
    render("2d_voronoi_relaxed.svg", &tess)?;

    Ok(())
}

fn render(filename: &str, tess: &Tessellation) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(filename, (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;

    let b = tess.bounds;
    let mut chart = ChartBuilder::on(&root)
        .build_cartesian_2d(b.xl()..b.xr(), b.yt()..b.yb())?;

    // Draw bounding box
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(b.xl(), b.yt()), (b.xr(), b.yt()), (b.xr(), b.yb()), (b.xl(), b.yb()), (b.xl(), b.yt())],
        BLACK.stroke_width(2),
    )))?;

    // Draw cells
    for cell in tess.cells() {
        if cell.is_empty() {
            continue;
        }
        let mut poly: Vec<(f64, f64)> = cell.vertices().iter().map(|v| (v.x, v.y)).collect();

        chart.draw_series(std::iter::once(Polygon::new(
            poly.clone(),
            BLUE.mix(0.1).filled(),
        )))?;

        poly.push(poly[0]);
        chart.draw_series(std::iter::once(PathElement::new(
            poly,
            BLACK.mix(0.5),
        )))?;
    }

    // Draw generators
    let points: Vec<(f64, f64)> = tess.generators.chunks(2).map(|c| (c[0], c[1])).collect();
    chart.draw_series(points.iter().map(|&p| Circle::new(p, 2, RED.filled())))?;

    root.present()?;
    println!("Output saved to {}", filename);
    Ok(())
}

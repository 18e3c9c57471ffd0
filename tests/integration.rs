use vorotwo::{
    generate, BoundingBox, Point, Tessellation, VoronoiError, BOX_ID_BOTTOM, BOX_ID_LEFT, BOX_ID_RIGHT, BOX_ID_TOP,
};

fn square_box() -> BoundingBox {
    BoundingBox::new([0.0, 0.0], [100.0, 100.0])
}

fn points(coords: &[[f64; 2]]) -> Vec<Point> {
    coords.iter().map(|&c| c.into()).collect()
}

#[test]
fn test_single_site_fills_box() {
    let diagram = generate(&points(&[[30.0, 60.0]]), square_box()).unwrap();

    assert_eq!(diagram.cells().len(), 1);
    let cell = diagram.cell(0).unwrap();
    assert!(cell.is_closed());
    assert_eq!(cell.half_edges().len(), 4);
    assert!((cell.area() - 10_000.0).abs() < 1e-9, "Expected area 10000, got {}", cell.area());

    let mut neighbors = cell.neighbors().to_vec();
    neighbors.sort();
    assert_eq!(neighbors, vec![BOX_ID_BOTTOM, BOX_ID_TOP, BOX_ID_RIGHT, BOX_ID_LEFT]);
    assert!(diagram.is_consistent());
}

#[test]
fn test_two_sites_same_row() {
    let diagram = generate(&points(&[[10.0, 50.0], [90.0, 50.0]]), square_box()).unwrap();

    assert_eq!(diagram.cells().len(), 2);
    let shared: Vec<_> = diagram.edges().iter().filter(|e| !e.is_border()).collect();
    assert_eq!(shared.len(), 1, "Expected one bisector edge");

    let edge = shared[0];
    let a = diagram.vertex(edge.start.unwrap());
    let b = diagram.vertex(edge.end.unwrap());
    assert!((a.x - 50.0).abs() < 1e-9 && (b.x - 50.0).abs() < 1e-9);
    assert!(((a.y - b.y).abs() - 100.0).abs() < 1e-9);

    for cell in diagram.cells() {
        assert!((cell.area() - 5_000.0).abs() < 1e-6, "Cell {} area {}", cell.id(), cell.area());
        assert_eq!(cell.half_edges().len(), 4);
    }
    assert!(diagram.cell(0).unwrap().neighbors().contains(&1));
    assert!(diagram.cell(1).unwrap().neighbors().contains(&0));
}

#[test]
fn test_two_sites_same_column() {
    let diagram = generate(&points(&[[50.0, 80.0], [50.0, 20.0]]), square_box()).unwrap();

    let top = diagram.cell(1).unwrap();
    let bottom = diagram.cell(0).unwrap();
    assert!((top.area() - 5_000.0).abs() < 1e-6);
    assert!((bottom.area() - 5_000.0).abs() < 1e-6);
    assert!(top.contains(&Point::new(50.0, 20.0)));
    assert!(bottom.contains(&Point::new(50.0, 80.0)));
}

#[test]
fn test_four_sites_share_center_vertex() {
    let sites = points(&[[10.0, 10.0], [90.0, 10.0], [10.0, 90.0], [90.0, 90.0]]);
    let diagram = generate(&sites, square_box()).unwrap();

    let center = Point::new(50.0, 50.0);
    let matches = diagram.vertices().iter().filter(|v| v.approx_eq(&center)).count();
    assert_eq!(matches, 1, "Center vertex should exist exactly once");

    for cell in diagram.cells() {
        assert!((cell.area() - 2_500.0).abs() < 1e-6, "Cell {} area {}", cell.id(), cell.area());
        assert!(cell.vertices().iter().any(|v| v.approx_eq(&center)));
    }

    let mut n0: Vec<i32> = diagram.cell(0).unwrap().neighbors().iter().copied().filter(|&n| n >= 0).collect();
    n0.sort();
    assert_eq!(n0, vec![1, 2]);
    assert!(diagram.is_consistent());
}

#[test]
fn test_collinear_sites() {
    let sites = points(&[[50.0, 10.0], [50.0, 50.0], [50.0, 90.0]]);
    let diagram = generate(&sites, square_box()).unwrap();

    let areas: Vec<f64> = diagram.cells().iter().map(|c| c.area()).collect();
    assert!((areas[0] - 3_000.0).abs() < 1e-6);
    assert!((areas[1] - 4_000.0).abs() < 1e-6);
    assert!((areas[2] - 3_000.0).abs() < 1e-6);
    assert!(diagram.is_consistent());
}

#[test]
fn test_regular_grid() {
    let mut sites = Vec::new();
    for j in 0..3 {
        for i in 0..3 {
            sites.push(Point::new(10.0 + 40.0 * i as f64, 10.0 + 40.0 * j as f64));
        }
    }
    let diagram = generate(&sites, square_box()).unwrap();

    let expected = [900.0, 1200.0, 900.0, 1200.0, 1600.0, 1200.0, 900.0, 1200.0, 900.0];
    for (cell, area) in diagram.cells().iter().zip(expected) {
        assert!((cell.area() - area).abs() < 1e-6, "Cell {} area {}, expected {}", cell.id(), cell.area(), area);
    }
    assert!((diagram.total_area() - 10_000.0).abs() < 1e-6);
    assert!(diagram.is_consistent());
}

#[test]
fn test_sites_on_box_boundary() {
    let sites = points(&[[0.0, 0.0], [100.0, 100.0], [0.0, 100.0]]);
    let diagram = generate(&sites, square_box()).unwrap();

    assert!((diagram.total_area() - 10_000.0).abs() < 1e-6);
    assert!(diagram.is_consistent());
}

#[test]
fn test_offset_bounds() {
    let bounds = BoundingBox::new([-20.0, 5.0], [20.0, 15.0]);
    let diagram = generate(&points(&[[-10.0, 10.0], [10.0, 10.0]]), bounds).unwrap();

    for cell in diagram.cells() {
        assert!((cell.area() - 200.0).abs() < 1e-9);
        assert!(cell.vertices().iter().all(|v| v.x >= -20.0 - 1e-9 && v.x <= 20.0 + 1e-9));
        assert!(cell.vertices().iter().all(|v| v.y >= 5.0 - 1e-9 && v.y <= 15.0 + 1e-9));
    }
}

#[test]
fn test_near_equal_row_pair() {
    // Rounding leaves the left site a few ulps below the right one.
    let sites = points(&[[65.0, 24.019237886466843], [35.0, 24.019237886466847]]);
    let diagram = generate(&sites, square_box()).unwrap();

    assert_eq!(diagram.edges().iter().filter(|e| !e.is_border()).count(), 1);
    assert!((diagram.total_area() - 10_000.0).abs() < 1e-6, "Total area {}", diagram.total_area());
    assert!(diagram.cell(0).unwrap().contains(&sites[0]));
    assert!(diagram.cell(1).unwrap().contains(&sites[1]));

    let mut with_third = sites.clone();
    with_third.push(Point::new(50.0, 60.0));
    let diagram = generate(&with_third, square_box()).unwrap();
    assert!((diagram.total_area() - 10_000.0).abs() < 1e-6);
    assert!(diagram.is_consistent());
}

#[test]
fn test_regular_hexagon() {
    let mut sites: Vec<Point> = (0..6)
        .map(|k| {
            let a = k as f64 * std::f64::consts::PI / 3.0;
            Point::new(50.0 + 30.0 * a.cos(), 50.0 + 30.0 * a.sin())
        })
        .collect();

    let diagram = generate(&sites, square_box()).unwrap();
    assert!((diagram.total_area() - 10_000.0).abs() < 1e-6);
    assert!(diagram.is_consistent());
    let center = Point::new(50.0, 50.0);
    assert_eq!(diagram.vertices().iter().filter(|v| v.dist(&center) < 1e-6).count(), 1);

    // With a site in the middle the center cell is a hexagon of inradius 15.
    sites.push(center);
    let diagram = generate(&sites, square_box()).unwrap();
    let middle = diagram.cell(6).unwrap();
    assert_eq!(middle.vertices().len(), 6);
    let expected = 6.0 * 15.0 * 15.0 / 3.0_f64.sqrt();
    assert!((middle.area() - expected).abs() < 1e-6, "Center area {}, expected {}", middle.area(), expected);
    assert!((diagram.total_area() - 10_000.0).abs() < 1e-6);
}

#[test]
fn test_site_at_pending_circle_event() {
    // (50, 60) is the lowest point of the circle through the first three
    // sites, so it arrives exactly when their circle event is due.
    let sites = points(&[[30.0, 40.0], [70.0, 40.0], [50.0, 20.0], [50.0, 60.0]]);
    let diagram = generate(&sites, square_box()).unwrap();

    let expected = [2450.0, 2450.0, 1600.0, 3500.0];
    for (cell, area) in diagram.cells().iter().zip(expected) {
        assert!((cell.area() - area).abs() < 1e-6, "Cell {} area {}, expected {}", cell.id(), cell.area(), area);
    }
    let center = Point::new(50.0, 40.0);
    assert_eq!(diagram.vertices().iter().filter(|v| v.approx_eq(&center)).count(), 1);
    assert!(diagram.is_consistent());
}

#[test]
fn test_input_errors() {
    assert!(matches!(generate(&[], square_box()), Err(VoronoiError::NoSites)));
    assert!(matches!(
        generate(&points(&[[10.0, 10.0], [10.0, 10.0]]), square_box()),
        Err(VoronoiError::DuplicateSite { first: 0, second: 1 })
    ));
    assert!(matches!(
        generate(&points(&[[-1.0, 10.0]]), square_box()),
        Err(VoronoiError::SiteOutOfBounds { index: 0, .. })
    ));
    assert!(matches!(
        generate(&points(&[[10.0, f64::INFINITY]]), square_box()),
        Err(VoronoiError::NonFiniteSite { index: 0 })
    ));
    assert!(matches!(
        generate(&points(&[[10.0, 10.0]]), BoundingBox::new([0.0, 0.0], [100.0, -1.0])),
        Err(VoronoiError::InvalidBounds { .. })
    ));
}

#[test]
fn test_tessellation_workflow() {
    let mut tess = Tessellation::new(square_box());
    tess.set_generators(&[10.0, 10.0, 90.0, 90.0]);
    assert_eq!(tess.count_cells(), 0);

    tess.calculate().unwrap();
    assert_eq!(tess.count_generators(), 2);
    assert_eq!(tess.count_cells(), 2);

    let c0 = tess.get_cell(0).expect("Should have cell 0");
    let c1 = tess.get_cell(1).expect("Should have cell 1");
    assert_eq!(c0.id(), 0);
    assert_eq!(c1.id(), 1);

    let total = c0.area() + c1.area();
    assert!((total - 10_000.0).abs() < 1e-6, "Total area should be 10000, got {}", total);
}

#[test]
fn test_failed_calculate_clears_cells() {
    let mut tess = Tessellation::new(square_box());
    tess.set_generators(&[10.0, 10.0, 90.0, 90.0]);
    tess.calculate().unwrap();

    tess.set_generators(&[10.0, 10.0, 10.0, 10.0]);
    assert!(tess.calculate().is_err());
    assert_eq!(tess.count_cells(), 0);
    assert!(matches!(tess.relax(), Err(VoronoiError::NotCalculated)));
}

use crate::bounds::BoundingBox;
use crate::cell::Cell;
use crate::tessellation::Tessellation;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

// --- Bounding Box ---

#[wasm_bindgen(typescript_custom_section)]
const TS_CONSTANTS_BOUNDS: &'static str = r#"
export const BOX_ID_LEFT = -1;
export const BOX_ID_RIGHT = -2;
export const BOX_ID_TOP = -3;
export const BOX_ID_BOTTOM = -4;
"#;

/// Represents an axis-aligned bounding box in the plane.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox2D {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

#[wasm_bindgen]
impl BoundingBox2D {
    #[wasm_bindgen(constructor)]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox2D {
        BoundingBox2D { min_x, min_y, max_x, max_y }
    }
}

impl From<BoundingBox2D> for BoundingBox {
    fn from(b: BoundingBox2D) -> Self {
        Self { min: [b.min_x, b.min_y], max: [b.max_x, b.max_y] }
    }
}

// --- Cell Wrapper ---

#[wasm_bindgen(js_name = Cell2D)]
pub struct Cell2DWASM {
    inner: Cell,
}

#[wasm_bindgen(js_class = Cell2D)]
impl Cell2DWASM {
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> usize { self.inner.id() }
    #[wasm_bindgen(getter)]
    pub fn site(&self) -> Vec<f64> { vec![self.inner.site().x, self.inner.site().y] }
    #[wasm_bindgen(getter)]
    pub fn vertices(&self) -> Vec<f64> { self.inner.flat_vertices() }
    #[wasm_bindgen(getter)]
    pub fn edge_neighbors(&self) -> Vec<i32> { self.inner.neighbors().to_vec() }
    pub fn area(&self) -> f64 { self.inner.area() }
    pub fn centroid(&self) -> Vec<f64> {
        let c = self.inner.centroid();
        vec![c.x, c.y]
    }
    pub fn contains(&self, x: f64, y: f64) -> bool { self.inner.contains(&[x, y].into()) }
}

// --- Tessellation ---

#[wasm_bindgen(js_name = Tessellation2D)]
pub struct Tessellation2D {
    inner: Tessellation,
}

#[wasm_bindgen(js_class = Tessellation2D)]
impl Tessellation2D {
    #[wasm_bindgen(constructor)]
    pub fn new(bounds: BoundingBox2D) -> Tessellation2D {
        Tessellation2D { inner: Tessellation::new(bounds.into()) }
    }
    pub fn set_generators(&mut self, generators: &[f64]) { self.inner.set_generators(generators); }
    pub fn set_generator(&mut self, index: usize, x: f64, y: f64) { self.inner.set_generator(index, &[x, y]); }
    pub fn random_generators(&mut self, count: usize) { self.inner.random_generators(count); }
    pub fn calculate(&mut self) -> Result<(), JsValue> {
        self.inner.calculate().map_err(|e| JsValue::from_str(&e.to_string()))
    }
    pub fn relax(&mut self) -> Result<(), JsValue> {
        self.inner.relax().map_err(|e| JsValue::from_str(&e.to_string()))
    }
    #[wasm_bindgen(getter)]
    pub fn count_generators(&self) -> usize { self.inner.count_generators() }
    #[wasm_bindgen(getter)]
    pub fn count_cells(&self) -> usize { self.inner.count_cells() }
    pub fn get_generator(&self, index: usize) -> Option<Vec<f64>> {
        self.inner.get_generator(index).map(|g| g.to_vec())
    }
    pub fn get_cell(&self, index: usize) -> Option<Cell2DWASM> {
        self.inner.get_cell(index).map(|cell| Cell2DWASM { inner: cell.clone() })
    }
    #[wasm_bindgen(getter)]
    pub fn generators(&self) -> Vec<f64> { self.inner.generators.clone() }
    #[wasm_bindgen(getter)]
    pub fn cells(&self) -> Vec<Cell2DWASM> {
        self.inner.cells().iter().map(|cell| Cell2DWASM { inner: cell.clone() }).collect()
    }
    #[wasm_bindgen(getter)]
    pub fn total_area(&self) -> f64 {
        self.inner.diagram().map_or(0.0, |d| d.total_area())
    }
}

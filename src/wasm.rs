//! WASM-exported table layout handle for DOM hosts.
//!
//! The JavaScript side owns the data and the DOM. It pushes row keys,
//! columns, scroll/resize events and measurements in, and pulls a render
//! plan out before each paint.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::config::TableConfig;
use crate::engine::TableEngine;
use crate::layout::{AffixInput, Pagination};
use crate::observer::{ContainerSize, ObserverRegistry, Subscription};
use crate::types::{ColumnDef, RowKey};

/// Layout state for one mounted table
#[wasm_bindgen]
pub struct TableLayout {
    engine: Rc<RefCell<TableEngine>>,
    rows: Vec<RowKey>,
    resize_observers: ObserverRegistry<ContainerSize>,
    /// Keeps the engine subscribed to container resizes until `free()`
    _resize: Subscription<ContainerSize>,
}

#[wasm_bindgen]
impl TableLayout {
    /// Create a layout handle from a (possibly partial) config object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<TableLayout, JsValue> {
        console_error_panic_hook::set_once();
        let config: TableConfig = if config.is_undefined() || config.is_null() {
            TableConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let engine = Rc::new(RefCell::new(TableEngine::new(config)));
        let resize_observers = ObserverRegistry::new();
        let weak = Rc::downgrade(&engine);
        let resize = resize_observers.register(move |size: &ContainerSize| {
            if let Some(engine) = weak.upgrade() {
                engine.borrow_mut().resize(size.width, size.height);
            }
        });
        Ok(TableLayout {
            engine,
            rows: Vec::new(),
            resize_observers,
            _resize: resize,
        })
    }

    /// Replace the row set with the given array of keys.
    #[wasm_bindgen(js_name = setRowKeys)]
    pub fn set_row_keys(&mut self, keys: js_sys::Array) {
        self.rows = keys
            .iter()
            .map(|k| {
                k.as_string()
                    .or_else(|| k.as_f64().map(|n| n.to_string()))
                    .unwrap_or_default()
            })
            .map(RowKey::from)
            .collect();
        self.engine.borrow_mut().rows_changed();
    }

    #[wasm_bindgen(js_name = setColumns)]
    pub fn set_columns(&mut self, columns: JsValue) -> Result<(), JsValue> {
        let columns: Vec<ColumnDef> = serde_wasm_bindgen::from_value(columns)?;
        self.engine.borrow_mut().set_columns(columns)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = setPagination)]
    pub fn set_pagination(&mut self, current: usize, page_size: usize) {
        let pagination = (page_size > 0).then(|| Pagination::new(current, page_size));
        self.engine.borrow_mut().set_pagination(pagination);
    }

    #[wasm_bindgen(js_name = setAffixInput)]
    pub fn set_affix_input(&mut self, input: JsValue) -> Result<(), JsValue> {
        let input: Option<AffixInput> = serde_wasm_bindgen::from_value(input)?;
        self.engine.borrow_mut().set_affix_input(input);
        Ok(())
    }

    /// Scroll event from the table content element.
    #[wasm_bindgen(js_name = onScroll)]
    pub fn on_scroll(&mut self, scroll_left: f32, scroll_top: f32) {
        self.engine.borrow_mut().scroll_to(scroll_left, scroll_top);
    }

    /// ResizeObserver entry for the table container.
    #[wasm_bindgen(js_name = onResize)]
    pub fn on_resize(&self, width: f32, height: f32) {
        self.resize_observers
            .notify(&ContainerSize { width, height });
    }

    /// Report a rendered row height. Returns true if a new plan is needed.
    #[wasm_bindgen(js_name = measureRow)]
    pub fn measure_row(&mut self, key: &str, height: f32) -> bool {
        self.engine.borrow_mut().measure_row(key, height)
    }

    /// Report a rendered column width. Returns true if a new plan is needed.
    #[wasm_bindgen(js_name = measureColumn)]
    pub fn measure_column(&mut self, key: &str, width: f32) -> bool {
        self.engine.borrow_mut().measure_column(key, width)
    }

    /// Drag-resize a column; returns the applied width.
    #[wasm_bindgen(js_name = resizeColumn)]
    pub fn resize_column(&mut self, key: &str, width: f32) -> Option<f32> {
        self.engine.borrow_mut().resize_column(key, width)
    }

    #[wasm_bindgen(js_name = needsRecompute)]
    pub fn needs_recompute(&self) -> bool {
        self.engine.borrow().needs_recompute()
    }

    /// Compute the render plan for the current inputs.
    pub fn plan(&mut self) -> Result<JsValue, JsValue> {
        let plan = self.engine.borrow_mut().plan(&self.rows);
        serde_wasm_bindgen::to_value(&plan)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }
}

//! Hands each frame's buffers to the page's renderer (`window.treeRenderer`).
//!
//! Instance buffers go across as `Float32Array` views of the `InstanceData`
//! layout: `[x, y, z, scale, r, g, b, a]` per instance.

use crate::constants::RENDERER_GLOBAL;
use glam::Mat4;
use js_sys::{Array, Float32Array, Function, Reflect};
use tree_core::{
    Facing, InstanceData, PanelMode, PhotoSlot, PopulationKind, RenderSink, Shape, StarPose,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub struct JsRenderer {
    handle: JsValue,
    population: Function,
    photos: Function,
    star: Function,
}

fn method(handle: &JsValue, name: &str) -> anyhow::Result<Function> {
    Reflect::get(handle, &JsValue::from_str(name))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<Function>()
        .map_err(|_| anyhow::anyhow!("{RENDERER_GLOBAL}.{name} is not a function"))
}

fn matrix(m: Mat4) -> Float32Array {
    Float32Array::from(&m.to_cols_array()[..])
}

fn shape_value(shape: Shape) -> JsValue {
    match shape {
        Shape::Point => JsValue::from_str("point"),
        Shape::Sphere { .. } => JsValue::from_str("sphere"),
        Shape::Cube { .. } => JsValue::from_str("cube"),
    }
}

fn shape_size(shape: Shape) -> f32 {
    match shape {
        Shape::Point => 1.0,
        Shape::Sphere { radius } => radius,
        Shape::Cube { size } => size,
    }
}

impl JsRenderer {
    pub fn from_window() -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let handle = Reflect::get(&window, &JsValue::from_str(RENDERER_GLOBAL))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        if handle.is_undefined() {
            anyhow::bail!("window.{RENDERER_GLOBAL} missing");
        }
        Ok(Self {
            population: method(&handle, "population")?,
            photos: method(&handle, "photos")?,
            star: method(&handle, "star")?,
            handle,
        })
    }

    fn call(&self, f: &Function, args: &[JsValue]) {
        let array: Array = args.iter().collect();
        if let Err(e) = f.apply(&self.handle, &array) {
            log::warn!("[render] {:?}", e);
        }
    }
}

impl RenderSink for JsRenderer {
    fn population(
        &mut self,
        kind: PopulationKind,
        shape: Shape,
        model: Mat4,
        instances: &[InstanceData],
    ) {
        let floats: &[f32] = bytemuck::cast_slice(instances);
        self.call(
            &self.population,
            &[
                JsValue::from_str(kind.as_str()),
                shape_value(shape),
                JsValue::from(shape_size(shape)),
                matrix(model).into(),
                Float32Array::from(floats).into(),
            ],
        );
    }

    fn photos(&mut self, model: Mat4, slots: &[PhotoSlot]) {
        // per panel: position xyz, scale, look-at xyz (NaN = face camera), active flag
        let mut poses = Vec::with_capacity(slots.len() * 8);
        let labels = Array::new();
        for slot in slots {
            let pose = &slot.pose;
            poses.extend_from_slice(&pose.position.to_array());
            poses.push(pose.scale);
            match pose.facing {
                Facing::Toward(p) => poses.extend_from_slice(&p.to_array()),
                Facing::Camera => poses.extend_from_slice(&[f32::NAN; 3]),
            }
            poses.push(if pose.mode == PanelMode::Active { 1.0 } else { 0.0 });
            labels.push(&JsValue::from_str(&slot.source.label()));
        }
        self.call(
            &self.photos,
            &[matrix(model).into(), Float32Array::from(&poses[..]).into(), labels.into()],
        );
    }

    fn star(&mut self, model: Mat4, star: &StarPose, halo_opacity: f32) {
        self.call(
            &self.star,
            &[
                matrix(model).into(),
                JsValue::from(star.position.y),
                JsValue::from(star.spin),
                JsValue::from(star.scale),
                JsValue::from(halo_opacity),
            ],
        );
    }
}

// BearPixel
// copyright bear_pixel developers 2025

//! layer.rs implements the render layers: named buckets of deferred draw
//! commands. Each layer has a z index and a pixel offset (camera-relative
//! layers get the camera offset, screen-fixed layers keep (0, 0)).
//!
//! Layers are drawn by ascending z index, ties broken by ascending id,
//! commands within one layer are drawn in enqueue order. Draining always
//! empties every queue, no command outlives its frame.

use crate::render::{command::DrawCommand, RenderError};
use itertools::Itertools;
use log::warn;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderLayer {
    pub id: String,
    /// None sorts like 0
    pub z_index: Option<i32>,
    pub queue: Vec<DrawCommand>,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl RenderLayer {
    pub fn new(id: &str, z_index: Option<i32>) -> Self {
        Self {
            id: id.to_string(),
            z_index,
            queue: vec![],
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    fn sort_key(&self) -> (i32, &str) {
        (self.z_index.unwrap_or(0), self.id.as_str())
    }
}

/// Commands of one layer taken out for drawing, offset already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerBatch {
    pub id: String,
    pub commands: Vec<DrawCommand>,
}

#[derive(Debug, Default)]
pub struct LayerQueue {
    layers: HashMap<String, RenderLayer>,
}

impl LayerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an empty layer. Re-adding an existing id replaces it
    /// (queued commands included) and logs a warning.
    pub fn add_layer(&mut self, id: &str, z_index: impl Into<Option<i32>>) {
        if self
            .layers
            .insert(id.to_string(), RenderLayer::new(id, z_index.into()))
            .is_some()
        {
            warn!("render layer '{}' already exists, overwriting", id);
        }
    }

    pub fn has_layer(&self, id: &str) -> bool {
        self.layers.contains_key(id)
    }

    pub fn layer(&self, id: &str) -> Option<&RenderLayer> {
        self.layers.get(id)
    }

    fn layer_mut(&mut self, id: &str) -> Result<&mut RenderLayer, RenderError> {
        self.layers
            .get_mut(id)
            .ok_or_else(|| RenderError::UnknownLayer(id.to_string()))
    }

    pub fn set_offset(&mut self, id: &str, x: f64, y: f64) -> Result<(), RenderError> {
        let l = self.layer_mut(id)?;
        l.offset_x = x;
        l.offset_y = y;
        Ok(())
    }

    pub fn enqueue(&mut self, id: &str, command: DrawCommand) -> Result<(), RenderError> {
        self.layer_mut(id)?.queue.push(command);
        Ok(())
    }

    pub fn queue_len(&self, id: &str) -> Option<usize> {
        self.layers.get(id).map(|l| l.queue.len())
    }

    /// total number of queued commands over all layers
    pub fn pending(&self) -> usize {
        self.layers.values().map(|l| l.queue.len()).sum()
    }

    /// Drops every queued command, layers and offsets stay.
    pub fn clear_all(&mut self) {
        for l in self.layers.values_mut() {
            l.queue.clear();
        }
    }

    /// Layer ids in draw order.
    pub fn draw_order(&self) -> Vec<String> {
        self.layers
            .values()
            .sorted_by(|a, b| a.sort_key().cmp(&b.sort_key()))
            .map(|l| l.id.clone())
            .collect()
    }

    /// Takes every queued command out in draw order, with each layer's
    /// offset applied, and leaves all queues empty.
    pub fn drain_sorted(&mut self) -> Vec<LayerBatch> {
        let order = self.draw_order();
        let mut batches = Vec::with_capacity(order.len());
        for id in order {
            if let Some(l) = self.layers.get_mut(&id) {
                let (dx, dy) = (l.offset_x, l.offset_y);
                let commands = std::mem::take(&mut l.queue)
                    .iter()
                    .map(|c| c.translated(dx, dy))
                    .collect();
                batches.push(LayerBatch { id, commands });
            }
        }
        batches
    }
}

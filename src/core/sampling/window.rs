use std::collections::VecDeque;

pub const DEFAULT_WINDOW_CAPACITY: usize = 5;

/// Bounded FIFO of recent raw values, averaged to smooth out sensor noise
#[derive(Debug, Clone)]
pub struct SmoothingWindow {
    capacity: usize,
    values: VecDeque<f32>,
}

impl SmoothingWindow {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_WINDOW_CAPACITY)
    }

    /// A capacity of zero is bumped to one so the window always keeps the latest value
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: f32) {
        if self.values.len() >= self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Arithmetic mean of the window, 0 when empty
    pub fn mean(&self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f32>() / self.values.len() as f32
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SmoothingWindow {
    fn default() -> Self {
        Self::new()
    }
}

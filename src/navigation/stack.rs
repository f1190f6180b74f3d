use std::collections::VecDeque;

use super::route::Route;

/// A single frame in the navigation history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationFrame {
    pub route: Route,
    /// Row selected on the page when it was left
    pub selected_index: usize,
    /// Table page shown when it was left
    pub page_index: usize,
}

impl NavigationFrame {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            selected_index: 0,
            page_index: 0,
        }
    }

    pub fn with_position(mut self, page_index: usize, selected_index: usize) -> Self {
        self.page_index = page_index;
        self.selected_index = selected_index;
        self
    }
}

/// Bounded back-history of visited pages; the oldest frame is dropped when full
#[derive(Debug, Clone)]
pub struct NavigationStack {
    frames: VecDeque<NavigationFrame>,
    max_size: usize,
}

impl NavigationStack {
    pub fn new(max_size: usize) -> Self {
        Self {
            frames: VecDeque::new(),
            max_size: max_size.max(1),
        }
    }

    pub fn push(&mut self, frame: NavigationFrame) {
        if self.frames.len() >= self.max_size {
            self.frames.pop_front();
        }
        self.frames.push_back(frame);
    }

    pub fn pop(&mut self) -> Option<NavigationFrame> {
        self.frames.pop_back()
    }

    pub fn current(&self) -> Option<&NavigationFrame> {
        self.frames.back()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(50)
    }
}

/// Manages list selection state
#[derive(Debug, Clone)]
pub struct ListState {
    selected: Option<usize>,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListState {
    /// Create a new ListState with no selection
    pub fn new() -> Self {
        Self { selected: None }
    }

    /// Create a new ListState with first item selected
    pub fn with_selection() -> Self {
        Self { selected: Some(0) }
    }

    /// Get currently selected index
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Set selected index
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    pub fn move_up(&mut self, item_count: usize) {
        if item_count == 0 {
            self.selected = None;
            return;
        }

        match self.selected {
            Some(sel) if sel > 0 => self.selected = Some(sel - 1),
            Some(_) => {}
            None => self.selected = Some(0),
        }
    }

    pub fn move_down(&mut self, item_count: usize) {
        if item_count == 0 {
            self.selected = None;
            return;
        }

        match self.selected {
            Some(sel) if sel + 1 < item_count => self.selected = Some(sel + 1),
            Some(_) => {}
            None => self.selected = Some(0),
        }
    }

    pub fn select_last(&mut self, item_count: usize) {
        self.selected = item_count.checked_sub(1);
    }

    /// Keep the selection inside a list that may have shrunk or become empty
    pub fn clamp(&mut self, item_count: usize) {
        self.selected = match (self.selected, item_count) {
            (_, 0) => None,
            (Some(sel), count) => Some(sel.min(count - 1)),
            (None, _) => Some(0),
        };
    }
}

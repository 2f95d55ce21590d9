use derive_more::{AsRef, Deref, Display, From, Into};

pub mod app;
pub mod theme;
pub mod view;

pub const ITEM_SIZE_DP: f64 = 56.0;
pub const PADDING_DP: f64 = 16.0;
pub const TOGGLE_LABEL: &str = "+";

/// Text drawn on a child; doubles as the handle the click listener receives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct ChildLabel(String);

impl ChildLabel {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

/// Toggle first, then `items` numbered from 1.
pub fn demo_children(items: usize) -> Vec<ChildLabel> {
    std::iter::once(ChildLabel::new(TOGGLE_LABEL))
        .chain((1..=items).map(|i| ChildLabel::new(i.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_children() {
        let labels: Vec<String> = demo_children(3).into_iter().map(Into::into).collect();
        assert_eq!(labels, vec!["+", "1", "2", "3"]);
        assert_eq!(demo_children(0).len(), 1);
    }
}

//! Lifecycle hooks for chart components.

/// Optional lifecycle handlers for a chart, invoked synchronously at
/// the named points and skipped when absent.
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct ChartHooks {
    /// Fired at the start of construction.
    pub on_init: Option<Box<dyn FnMut()>>,
    /// Fired once the chart has been built and its first frame drawn.
    pub on_create: Option<Box<dyn FnMut()>>,
    /// Fired before a layout rebuild.
    pub on_before_render: Option<Box<dyn FnMut()>>,
    /// Fired for every rendered data row with (label, value, percent).
    /// Only the bar chart has per-row render semantics.
    pub on_each_render: Option<Box<dyn FnMut(&str, f64, f64)>>,
    /// Fired with the index of every rendered data row.
    pub on_each_line: Option<Box<dyn FnMut(usize)>>,
    /// Fired when a row click is dispatched.
    pub on_line_click: Option<Box<dyn FnMut(usize)>>,
    /// Fired after a layout rebuild.
    pub on_after_render: Option<Box<dyn FnMut()>>,
    /// Fired at the end of every redraw.
    pub on_redraw: Option<Box<dyn FnMut()>>,
    /// Fired when the chart becomes visible.
    pub on_show: Option<Box<dyn FnMut()>>,
    /// Fired when the chart is hidden.
    pub on_hide: Option<Box<dyn FnMut()>>,
    /// Fired when the chart is destroyed.
    pub on_destroy: Option<Box<dyn FnMut()>>,
}

impl ChartHooks {
    /// Hooks with every handler absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_default_hooks_are_absent() {
        let hooks = ChartHooks::new();
        assert!(hooks.on_init.is_none());
        assert!(hooks.on_destroy.is_none());
    }

    #[test]
    fn test_hook_invocation() {
        let count = Rc::new(Cell::new(0));
        let mut hooks = ChartHooks {
            on_redraw: Some(Box::new({
                let count = Rc::clone(&count);
                move || count.set(count.get() + 1)
            })),
            ..ChartHooks::default()
        };

        if let Some(f) = hooks.on_redraw.as_mut() {
            f();
        }
        assert_eq!(count.get(), 1);
    }
}

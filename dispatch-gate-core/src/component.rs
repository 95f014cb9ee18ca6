//! Component trait and the gated wrapper around it

use std::fmt;

use ratatui::{layout::Rect, Frame};

use crate::gate::DispatchGate;
use crate::props::Props;
use crate::store::Dispatcher;
use crate::Action;

/// A pure UI component that renders based on props
///
/// `render` is a pure function of props (plus internal UI state like scroll
/// position). The host decides when to call it.
///
/// # Example
///
/// ```ignore
/// use dispatch_gate::{Component, Frame, Props, Rect};
///
/// struct Title;
///
/// impl Component for Title {
///     type Props<'a> = &'a Props;
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         let text = props.get_str("title").unwrap_or("untitled");
///         frame.render_widget(Paragraph::new(text), area);
///     }
/// }
/// ```
pub trait Component {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}

/// What the host passes a gated component each cycle: the current state and
/// the incoming props.
#[derive(Debug)]
pub struct GatedProps<'a, S> {
    pub state: &'a S,
    pub props: &'a Props,
}

impl<S> Clone for GatedProps<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for GatedProps<'_, S> {}

impl<'a, S> GatedProps<'a, S> {
    /// Pair the current state with the incoming props.
    pub fn new(state: &'a S, props: &'a Props) -> Self {
        Self { state, props }
    }
}

/// A component wrapped by a [`DispatchGate`].
///
/// Every render runs one gate cycle, dispatches the resulting action (if any)
/// through the injected dispatcher, then renders the inner component with the
/// incoming props exactly as received. Connected props never reach the inner
/// component.
pub struct Gated<C, S, A, D> {
    gate: DispatchGate<S, A>,
    inner: C,
    dispatcher: D,
}

impl<C, S, A: Action, D: Dispatcher<A>> Gated<C, S, A, D> {
    /// Wrap `inner`, dispatching gate actions through `dispatcher`.
    ///
    /// Usually reached through [`DispatchGate::wrap`].
    pub fn new(gate: DispatchGate<S, A>, inner: C, dispatcher: D) -> Self {
        Self {
            gate,
            inner,
            dispatcher,
        }
    }

    /// Get a reference to the gate
    pub fn gate(&self) -> &DispatchGate<S, A> {
        &self.gate
    }

    /// Get a reference to the wrapped component
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Get a mutable reference to the wrapped component
    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    /// Get a reference to the dispatcher
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Get a mutable reference to the dispatcher
    pub fn dispatcher_mut(&mut self) -> &mut D {
        &mut self.dispatcher
    }

    /// Run one gate cycle without rendering. Returns whether it dispatched.
    pub fn cycle(&mut self, state: &S, props: &Props) -> bool {
        match self.gate.on_cycle(state, props) {
            Some(action) => {
                self.dispatcher.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Split back into gate, component and dispatcher.
    pub fn into_parts(self) -> (DispatchGate<S, A>, C, D) {
        (self.gate, self.inner, self.dispatcher)
    }
}

impl<C, S, A, D> Component for Gated<C, S, A, D>
where
    C: for<'a> Component<Props<'a> = &'a Props>,
    S: 'static,
    A: Action,
    D: Dispatcher<A>,
{
    type Props<'a> = GatedProps<'a, S>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.cycle(props.state, props.props);
        self.inner.render(frame, area, props.props);
    }
}

impl<C: fmt::Debug, S, A, D> fmt::Debug for Gated<C, S, A, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gated")
            .field("gate", &self.gate)
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GateConfig;
    use crate::testing::RenderHarness;
    use ratatui::widgets::Paragraph;
    use serde_json::json;
    use tokio::sync::mpsc;

    #[derive(Clone, Debug, PartialEq)]
    enum PageAction {
        Open(serde_json::Value),
    }

    impl Action for PageAction {
        fn name(&self) -> &'static str {
            "Open"
        }
    }

    struct PageState {
        ready: bool,
    }

    /// Records the props it was rendered with.
    #[derive(Debug, Default)]
    struct Page {
        seen: Vec<Props>,
    }

    impl Component for Page {
        type Props<'a> = &'a Props;

        fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
            self.seen.push(props.clone());
            let text = props.get_str("title").unwrap_or("untitled");
            frame.render_widget(Paragraph::new(text), area);
        }
    }

    fn gate() -> DispatchGate<PageState, PageAction> {
        DispatchGate::new(
            GateConfig::new(|mut args: Vec<serde_json::Value>| PageAction::Open(args.remove(0)))
                .select("secret", |_: &PageState, _| json!("connected only"))
                .arg("page")
                .condition(|s, _| s.ready),
        )
    }

    #[test]
    fn test_render_dispatches_then_renders_inner() {
        let (tx, mut rx) = mpsc::unbounded_channel::<PageAction>();
        let mut gated = gate().wrap(Page::default(), tx);
        let mut render = RenderHarness::new(20, 1);

        let state = PageState { ready: true };
        let props = Props::new().with("title", "Todos").with("page", 2);

        let output = render.render_to_string_plain(|frame| {
            gated.render(frame, frame.area(), GatedProps::new(&state, &props));
        });

        assert_eq!(output.trim_end(), "Todos");
        assert_eq!(rx.try_recv().ok(), Some(PageAction::Open(json!(2))));
    }

    #[test]
    fn test_inner_receives_original_props() {
        let (tx, _rx) = mpsc::unbounded_channel::<PageAction>();
        let mut gated = gate().wrap(Page::default(), tx);
        let mut render = RenderHarness::new(20, 1);

        let state = PageState { ready: true };
        let props = Props::new().with("page", 1);
        render.render(|frame| {
            gated.render(frame, frame.area(), GatedProps::new(&state, &props));
        });

        assert_eq!(gated.inner().seen, vec![props]);
        assert!(!gated.inner().seen[0].contains_key("secret"));
    }

    #[test]
    fn test_output_same_with_or_without_dispatch() {
        let props = Props::new().with("title", "Todos").with("page", 1);
        let mut render = RenderHarness::new(20, 1);

        let mut plain = Page::default();
        let expected = render.render_to_string_plain(|frame| {
            plain.render(frame, frame.area(), &props);
        });

        for ready in [true, false] {
            let (tx, mut rx) = mpsc::unbounded_channel::<PageAction>();
            let mut gated = gate().wrap(Page::default(), tx);
            let state = PageState { ready };
            let output = render.render_to_string_plain(|frame| {
                gated.render(frame, frame.area(), GatedProps::new(&state, &props));
            });

            assert_eq!(output, expected);
            assert_eq!(rx.try_recv().is_ok(), ready);
        }
    }

    #[test]
    fn test_cycle_without_render() {
        let mut dispatched = Vec::<PageAction>::new();
        let mut gated = gate().wrap(Page::default(), &mut dispatched);

        assert!(gated.cycle(&PageState { ready: true }, &Props::new().with("page", 4)));
        assert!(!gated.cycle(&PageState { ready: false }, &Props::new().with("page", 4)));
        assert!(gated.inner().seen.is_empty());
        drop(gated);

        assert_eq!(dispatched, vec![PageAction::Open(json!(4))]);
    }

    impl Dispatcher<PageAction> for Vec<PageAction> {
        fn dispatch(&mut self, action: PageAction) {
            self.push(action);
        }
    }
}

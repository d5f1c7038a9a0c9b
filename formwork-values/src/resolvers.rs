use crate::PropertyProps;

/// Caller-supplied set of UI renderers keyed by logical role.
///
/// The core never assumes a concrete UI kit; consumers implement this
/// against whatever view type their renderer produces and hand it to the
/// form layer. Props objects built by
/// [`crate::build_props_for_property`] are passed through untouched.
pub trait Resolvers {
    /// The renderer's view/output type.
    type View;

    /// Busy indicator shown while a lifecycle sequence is in flight.
    fn spinner(&self) -> Self::View;

    /// Container with a heading, used to wrap forms and error surfaces.
    fn card(&self, title: &str, body: Vec<Self::View>) -> Self::View;

    /// Action button.
    fn button(&self, label: &str) -> Self::View;

    /// Input for one property, configured by its props object.
    fn input(&self, props: &PropertyProps) -> Self::View;
}

use strum_macros::Display;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    Pending,
    /// Only published for the duration of a failed dispatch, never held.
    Error,
}

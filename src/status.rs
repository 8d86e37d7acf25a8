//! Outcome of an asynchronous data operation, as seen by a consumer.

/// Status of a data operation.
///
/// A producer emits [`DataStatus::Loading`] first, then exactly one terminal
/// state ([`DataStatus::Success`] or [`DataStatus::Error`]). The type itself
/// does not enforce that ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataStatus<T> {
    /// The operation is in progress.
    Loading,

    /// The operation succeeded with this payload.
    Success(T),

    /// The operation failed with this message.
    Error(String),
}

impl<T> DataStatus<T> {
    /// Loading state
    pub fn loading() -> Self {
        DataStatus::Loading
    }

    /// Success state carrying `data`
    pub fn success(data: T) -> Self {
        DataStatus::Success(data)
    }

    /// Error state carrying `message`
    pub fn error<S: Into<String>>(message: S) -> Self {
        DataStatus::Error(message.into())
    }

    /// Success or Error: nothing follows for the same request.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DataStatus::Loading)
    }

    /// Payload, when successful.
    pub fn data(&self) -> Option<&T> {
        match self {
            DataStatus::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Message, when failed.
    pub fn message(&self) -> Option<&str> {
        match self {
            DataStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn constructors_match_variants() {
        assert_eq!(DataStatus::<Vec<u8>>::loading(), DataStatus::Loading);
        assert_eq!(DataStatus::success(vec![1u8]), DataStatus::Success(vec![1]));
        assert_eq!(
            DataStatus::<()>::error("boom"),
            DataStatus::Error("boom".to_string())
        );
    }

    #[test]
    fn only_loading_is_not_terminal() {
        assert!(!DataStatus::<()>::Loading.is_terminal());
        assert!(DataStatus::Success(()).is_terminal());
        assert!(DataStatus::<()>::error("x").is_terminal());
    }

    #[test]
    fn accessors_follow_the_variant() {
        let ok: DataStatus<Vec<u8>> = DataStatus::success(vec![]);
        assert_eq!(ok.data(), Some(&vec![]));
        assert_eq!(ok.message(), None);

        let err: DataStatus<Vec<u8>> = DataStatus::error("offline");
        assert_eq!(err.data(), None);
        assert_eq!(err.message(), Some("offline"));
    }
}

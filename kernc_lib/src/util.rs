pub trait Ice {
    type Target;

    /// Unwraps `self` or panics with an ICE (Internal Compiler Error) mentioning the error.
    fn ice(self) -> Self::Target;
}

impl<T, E: std::fmt::Display> Ice for Result<T, E> {
    type Target = T;

    #[track_caller]
    fn ice(self) -> T {
        match self {
            Ok(value) => value,
            Err(err) => panic!("ICE: {err}"),
        }
    }
}

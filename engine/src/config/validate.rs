/// Cross-field checks for settings loaded from outside. The error message is
/// shown to the user unchanged.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;

    fn validated(self) -> Result<Self, String>
    where
        Self: Sized,
    {
        self.validate()?;
        Ok(self)
    }
}

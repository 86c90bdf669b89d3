/// Generation options.
///
/// The defaults emit a plain `CREATE TABLE`, a `DROP TABLE IF EXISTS` and let
/// columns without a typed decode function through as loosely typed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Emit `CREATE TABLE IF NOT EXISTS`.
    pub create_if_not_exists: bool,
    /// Emit `DROP TABLE IF EXISTS`.
    pub drop_if_exists: bool,
    /// Reject columns whose decode function cannot be determined instead of
    /// falling back to an opaque pass-through.
    pub strict_decode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            create_if_not_exists: false,
            drop_if_exists: true,
            strict_decode: false,
        }
    }
}

impl Config {
    pub fn create_if_not_exists(mut self, value: bool) -> Self {
        self.create_if_not_exists = value;
        self
    }
    pub fn drop_if_exists(mut self, value: bool) -> Self {
        self.drop_if_exists = value;
        self
    }
    pub fn strict_decode(mut self, value: bool) -> Self {
        self.strict_decode = value;
        self
    }
}

/// Binding keys under which the [`Bootstrapper`](crate::Bootstrapper) records
/// its inputs in the [`Container`](keystone_core::Container).
pub struct BootBindings;

impl BootBindings {
    /// Key of the project root directory, bound as a
    /// [`PathBuf`](std::path::PathBuf) value.
    pub const PROJECT_ROOT: &'static str = "application.projectRoot";

    /// Key of the [`BootOptions`](crate::BootOptions) value.
    pub const BOOT_OPTIONS: &'static str = "application.bootOptions";
}

//! UI Widgets

pub mod footer;
pub mod header;
pub mod help_overlay;
pub mod loading;
pub mod overview;
pub mod performance;
pub mod processes;
pub mod sidebar;
pub mod system_info;

pub use footer::Footer;
pub use header::Header;
pub use help_overlay::HelpOverlay;
pub use loading::Loading;
pub use overview::OverviewSection;
pub use performance::PerformanceSection;
pub use processes::ProcessesSection;
pub use sidebar::Sidebar;
pub use system_info::SystemInfoSection;

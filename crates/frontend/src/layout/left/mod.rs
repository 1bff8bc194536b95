mod sidebar;

pub use sidebar::Sidebar;

//! Sidebar sub-menus, of which at most one is open at a time.

use maud::{Markup, html};

/// A sub-menu and whether it is shown.
#[derive(Debug, Clone)]
struct SubMenu {
    id: String,
    items: Vec<(String, String)>,
    visible: bool,
}

/// The sub-menus of the sidebar.
#[derive(Debug, Clone, Default)]
pub struct SubMenus {
    menus: Vec<SubMenu>,
}

impl SubMenus {
    /// No sub-menus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hidden sub-menu with the given `(url, title)` links.
    pub fn with_menu(mut self, id: &str, items: &[(&str, &str)]) -> Self {
        self.menus.push(SubMenu {
            id: id.to_owned(),
            items: items
                .iter()
                .map(|(url, title)| ((*url).to_owned(), (*title).to_owned()))
                .collect(),
            visible: false,
        });
        self
    }

    /// Show the menu `id` if it is hidden and hide it if it is shown.
    /// Every other menu is hidden.
    pub fn toggle(&mut self, id: &str) {
        for menu in &mut self.menus {
            menu.visible = menu.id == id && !menu.visible;
        }
    }

    /// Whether the menu `id` is shown.
    pub fn is_visible(&self, id: &str) -> bool {
        self.menus.iter().any(|menu| menu.id == id && menu.visible)
    }

    /// The menus with class `sub-menu`.
    pub fn render(&self) -> Markup {
        html! {
            @for menu in &self.menus {
                ul
                    id=(menu.id)
                    class="sub-menu"
                    style={"display: " (if menu.visible { "block" } else { "none" })}
                {
                    @for (url, title) in &menu.items {
                        li { a href=(url) { (title) } }
                    }
                }
            }
        }
    }
}

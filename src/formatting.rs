//! HTML rendering for list and todo pages
//!
//! Templates are compiled into the binary and rendered with Tera. Every page
//! extends `layout.html`, which shows the pending flash message if any.

use crate::flash::Flash;
use crate::todo::{List, ListSummary, Todo};
use tera::{Context, Tera};

const TEMPLATES: [(&str, &str); 5] = [
    ("layout.html", include_str!("../templates/layout.html")),
    ("lists.html", include_str!("../templates/lists.html")),
    ("list.html", include_str!("../templates/list.html")),
    ("new_list.html", include_str!("../templates/new_list.html")),
    ("edit_list.html", include_str!("../templates/edit_list.html")),
];

pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Compile the embedded templates
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    /// Index page: every list with its remaining/total counters
    ///
    /// # Arguments
    /// * `lists` - Summaries already in display order
    /// * `flash` - Message to show above the lists
    pub fn render_lists(
        &self,
        lists: &[ListSummary],
        flash: Option<&Flash>,
    ) -> Result<String, tera::Error> {
        let mut context = base_context(flash);
        context.insert("lists", lists);
        self.tera.render("lists.html", &context)
    }

    /// Single list page
    ///
    /// # Arguments
    /// * `list` - The list being shown
    /// * `todos` - Its todos, already in display order
    /// * `flash` - Message to show above the todos
    /// * `todo_name` - Rejected input to put back into the new-todo field
    pub fn render_list(
        &self,
        list: &List,
        todos: &[Todo],
        flash: Option<&Flash>,
        todo_name: Option<&str>,
    ) -> Result<String, tera::Error> {
        let mut context = base_context(flash);
        context.insert("list", &list.summary());
        context.insert("todos", todos);
        context.insert("todo_name", todo_name.unwrap_or_default());
        self.tera.render("list.html", &context)
    }

    pub fn render_new_list(
        &self,
        flash: Option<&Flash>,
        list_name: Option<&str>,
    ) -> Result<String, tera::Error> {
        let mut context = base_context(flash);
        context.insert("list_name", list_name.unwrap_or_default());
        self.tera.render("new_list.html", &context)
    }

    /// Rename form, prefilled with `list_name` or the current name
    pub fn render_edit_list(
        &self,
        list: &List,
        flash: Option<&Flash>,
        list_name: Option<&str>,
    ) -> Result<String, tera::Error> {
        let mut context = base_context(flash);
        context.insert("list", &list.summary());
        context.insert("list_name", list_name.unwrap_or(list.name.as_str()));
        self.tera.render("edit_list.html", &context)
    }
}

fn base_context(flash: Option<&Flash>) -> Context {
    let mut context = Context::new();
    context.insert("flash", &flash);
    context
}

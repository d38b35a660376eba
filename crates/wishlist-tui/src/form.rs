// Local draft state for the "add item" form
use wishlist_api::ItemDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Description,
    Url,
    Category,
    Downloaded,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Description,
        FormField::Url,
        FormField::Category,
        FormField::Downloaded,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Description => "Description",
            FormField::Url => "URL",
            FormField::Category => "Category",
            FormField::Downloaded => "Already Downloaded",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "Item name",
            FormField::Description => "Item description",
            FormField::Url => "https://example.com",
            FormField::Category => "Category",
            FormField::Downloaded => "",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Transient draft owned by the form until it is submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftForm {
    pub name: String,
    pub description: String,
    pub url: String,
    pub category: String,
    pub downloaded: bool,
    pub focus: FormField,
    /// Validation message from the last submit attempt
    pub notice: Option<&'static str>,
}

impl DraftForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.notice = None;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn set_downloaded(&mut self, downloaded: bool) {
        self.downloaded = downloaded;
    }

    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.name.clone(),
            FormField::Description => self.description.clone(),
            FormField::Url => self.url.clone(),
            FormField::Category => self.category.clone(),
            FormField::Downloaded => if self.downloaded { "[x]" } else { "[ ]" }.to_string(),
        }
    }

    /// Type a character into the focused field. Space toggles the checkbox.
    pub fn push_char(&mut self, c: char) {
        if self.focus == FormField::Downloaded {
            if c == ' ' {
                self.set_downloaded(!self.downloaded);
            }
            return;
        }
        self.edit_focused(|text| text.push(c));
    }

    pub fn pop_char(&mut self) {
        self.edit_focused(|text| {
            text.pop();
        });
    }

    /// Run a text edit on the focused field and store the result through
    /// that field's setter. No-op on the checkbox.
    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        let mut text = match self.focus {
            FormField::Name => std::mem::take(&mut self.name),
            FormField::Description => std::mem::take(&mut self.description),
            FormField::Url => std::mem::take(&mut self.url),
            FormField::Category => std::mem::take(&mut self.category),
            FormField::Downloaded => return,
        };
        edit(&mut text);
        match self.focus {
            FormField::Name => self.set_name(text),
            FormField::Description => self.set_description(text),
            FormField::Url => self.set_url(text),
            FormField::Category => self.set_category(text),
            FormField::Downloaded => {}
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn previous_field(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Hand back a complete draft and reset to blank.
    /// An empty name keeps the form as is and sets a notice.
    pub fn submit(&mut self) -> Option<ItemDraft> {
        if self.name.trim().is_empty() {
            self.notice = Some("Name is required");
            self.focus = FormField::Name;
            return None;
        }

        let draft = ItemDraft::new(self.name.clone())
            .description(self.description.clone())
            .url(self.url.clone())
            .category(self.category.clone())
            .downloaded(self.downloaded);

        self.reset();
        Some(draft)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

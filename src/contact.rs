//! Contact form: validation, `mailto:` hand-off and copy-email control.
//!
//! The form never posts anywhere. A valid submission is turned into a
//! `mailto:` link opened in a new browsing context, which hands the
//! message to the visitor's mail client.

use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::host::{Event, EventKind, Host, NodeId, Selector, Target};
use crate::notify::{self, NoticeKind};
use crate::options::{ContactOptions, NotificationOptions};
use crate::util::uri::encode_component;

/// Class of the contact form.
pub const FORM_CLASS: &str = "contact-form";
/// Class of the copy-email control.
pub const COPY_CLASS: &str = "copy-email";

const MISSING_FIELDS: &str = "Please fill in all fields.";
const MAIL_CLIENT_OPENED: &str =
    "Email client opened. Please send your message.";
const EMAIL_COPIED: &str = "Email copied to clipboard!";

/// Required form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Sender name.
    Name,
    /// Sender address.
    Email,
    /// Message body.
    Message,
}

impl Field {
    /// Every required field, in form order.
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// Control `name` attribute.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

/// Contact form validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactError {
    /// A required field is absent or empty.
    MissingField(Field),
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => {
                write!(f, "missing required field `{}`", field.name())
            }
        }
    }
}

impl std::error::Error for ContactError {}

/// A validated contact submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    /// Sender name.
    pub name: String,
    /// Sender address (not validated beyond presence).
    pub email: String,
    /// Message body.
    pub message: String,
}

impl ContactMessage {
    /// Validate raw form values. Fields are used verbatim; only absent or
    /// empty values are rejected.
    pub fn from_fields(
        name: Option<String>,
        email: Option<String>,
        message: Option<String>,
    ) -> Result<Self, ContactError> {
        let require = |value: Option<String>, field| {
            value
                .filter(|v| !v.is_empty())
                .ok_or(ContactError::MissingField(field))
        };
        Ok(Self {
            name: require(name, Field::Name)?,
            email: require(email, Field::Email)?,
            message: require(message, Field::Message)?,
        })
    }

    /// Mail subject line.
    #[must_use]
    pub fn subject(&self) -> String {
        format!("Contact from {}", self.name)
    }

    /// Mail body.
    #[must_use]
    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.name, self.email, self.message
        )
    }

    /// `mailto:` URI addressed to `recipient` with encoded subject and body.
    #[must_use]
    pub fn mailto(&self, recipient: &str) -> String {
        format!(
            "mailto:{recipient}?subject={}&body={}",
            encode_component(&self.subject()),
            encode_component(&self.body())
        )
    }
}

/// Which clipboard path a copy took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    /// Asynchronous clipboard API; the toast follows the resolved write.
    Clipboard,
    /// Offscreen textarea + `copy` command. The outcome is not checked and
    /// the success toast is shown regardless.
    Selection,
}

/// Contact form and copy-email wiring.
pub struct ContactFormManager<H: Host> {
    host: Rc<H>,
    form: NodeId,
    options: ContactOptions,
    notifications: NotificationOptions,
}

impl<H: Host> fmt::Debug for ContactFormManager<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactFormManager")
            .field("form", &self.form)
            .field("email", &self.options.email)
            .finish_non_exhaustive()
    }
}

impl<H: Host + 'static> ContactFormManager<H> {
    /// Wire the form's submit handler and the copy-email control. Returns
    /// `None` (and wires nothing, not even the copy control) when the page
    /// has no contact form.
    pub fn attach(
        host: &Rc<H>,
        options: &ContactOptions,
        notifications: &NotificationOptions,
    ) -> Option<Rc<Self>> {
        let Some(form) = host.query(&Selector::class(FORM_CLASS)) else {
            debug!("no .{FORM_CLASS}; contact form inert");
            return None;
        };
        let manager = Rc::new(Self {
            host: Rc::clone(host),
            form,
            options: options.clone(),
            notifications: notifications.clone(),
        });

        let this = Rc::clone(&manager);
        host.listen(
            Target::Node(form),
            EventKind::Submit,
            Rc::new(move |event: &Event| {
                event.prevent_default();
                let _ = this.submit();
            }),
        );

        if let Some(button) = host.query(&Selector::class(COPY_CLASS)) {
            let this = Rc::clone(&manager);
            host.listen(
                Target::Node(button),
                EventKind::Click,
                Rc::new(move |_: &Event| {
                    let _ = this.copy_email();
                }),
            );
        }

        Some(manager)
    }

    /// Validate the form and hand the message to the mail client.
    ///
    /// On success the `mailto:` link is opened in a new context, a success
    /// toast is shown and the form is reset; the link is returned. On a
    /// missing field only an error toast is shown.
    pub fn submit(&self) -> Result<String, ContactError> {
        let [name, email, message] = Field::ALL
            .map(|field| self.host.form_value(self.form, field.name()));
        let contact = match ContactMessage::from_fields(name, email, message) {
            Ok(contact) => contact,
            Err(err) => {
                debug!("contact form rejected: {err}");
                self.notify(MISSING_FIELDS, NoticeKind::Error);
                return Err(err);
            }
        };

        let link = contact.mailto(&self.options.email);
        self.host.open(&link, "_blank");
        self.notify(MAIL_CLIENT_OPENED, NoticeKind::Success);
        self.host.reset_form(self.form);
        Ok(link)
    }

    /// Copy the contact address to the clipboard.
    pub fn copy_email(&self) -> CopyPath {
        let notice_host = Rc::clone(&self.host);
        let notifications = self.notifications.clone();
        let announced = self.host.write_clipboard(
            &self.options.email,
            Box::new(move || {
                let _ = notify::show(
                    &notice_host,
                    EMAIL_COPIED,
                    NoticeKind::Success,
                    &notifications,
                );
            }),
        );
        if announced {
            return CopyPath::Clipboard;
        }

        self.copy_via_selection(&self.options.email);
        self.notify(EMAIL_COPIED, NoticeKind::Success);
        CopyPath::Selection
    }

    fn copy_via_selection(&self, text: &str) {
        let Some(body) = self.host.body() else {
            return;
        };
        let Some(area) = self.host.create_element("textarea") else {
            return;
        };
        self.host.set_value(area, text);
        self.host.append_child(body, area);
        self.host.select(area);
        if !self.host.exec_copy() {
            debug!("copy command reported failure");
        }
        self.host.remove(area);
    }

    fn notify(&self, message: &str, kind: NoticeKind) {
        let _ = notify::show(&self.host, message, kind, &self.notifications);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryHost;

    struct Fixture {
        host: Rc<MemoryHost>,
        form: NodeId,
        fields: Vec<NodeId>,
        copy: NodeId,
        manager: Rc<ContactFormManager<MemoryHost>>,
    }

    fn fixture() -> Fixture {
        let host = MemoryHost::shared();
        let body = host.body().unwrap();
        let form = host.insert_with_classes(body, "form", &[FORM_CLASS]);
        let fields = Field::ALL
            .iter()
            .map(|field| {
                let tag = if *field == Field::Message {
                    "textarea"
                } else {
                    "input"
                };
                let control = host.insert(form, tag);
                host.set_attribute(control, "name", field.name());
                control
            })
            .collect();
        let copy = host.insert_with_classes(body, "button", &[COPY_CLASS]);
        let manager = ContactFormManager::attach(
            &host,
            &ContactOptions::default(),
            &NotificationOptions::default(),
        )
        .unwrap();
        Fixture {
            host,
            form,
            fields,
            copy,
            manager,
        }
    }

    fn fill(f: &Fixture, values: [&str; 3]) {
        for (&control, value) in f.fields.iter().zip(values) {
            f.host.set_value(control, value);
        }
    }

    fn toasts(f: &Fixture, kind: NoticeKind) -> usize {
        f.host
            .query_all(&Selector::class(&format!(
                "notification--{}",
                kind.as_str()
            )))
            .len()
    }

    #[test]
    fn any_empty_field_is_rejected() {
        for blank in 0..3 {
            let f = fixture();
            let mut values = ["Ada", "ada@example.org", "Hello"];
            values[blank] = "";
            fill(&f, values);

            let event = f.host.submit(f.form);
            assert!(event.default_prevented());
            assert_eq!(toasts(&f, NoticeKind::Error), 1);
            assert_eq!(toasts(&f, NoticeKind::Success), 0);
            assert!(f.host.opened().is_empty());
            // Nothing was reset.
            let next = (blank + 1) % 3;
            assert_eq!(f.host.value(f.fields[next]), values[next]);
        }
    }

    #[test]
    fn valid_submission_opens_encoded_mailto_and_resets() {
        let f = fixture();
        fill(&f, ["Ada Lovelace", "ada@example.org", "Hi & thanks?\nAda"]);
        let _ = f.host.submit(f.form);

        let opened = f.host.opened();
        assert_eq!(opened.len(), 1);
        let (url, target) = &opened[0];
        assert_eq!(target, "_blank");
        assert!(url.starts_with("mailto:kianoosh.vadaei@gmail.com?subject="));
        assert!(url.contains("subject=Contact%20from%20Ada%20Lovelace"));
        assert!(url.contains("Ada%20Lovelace"));
        assert!(url.contains("ada%40example.org"));
        assert!(url.contains("Hi%20%26%20thanks%3F%0AAda"));

        assert_eq!(toasts(&f, NoticeKind::Success), 1);
        for &control in &f.fields {
            assert_eq!(f.host.value(control), "");
        }
    }

    #[test]
    fn mailto_layout() {
        let message = ContactMessage::from_fields(
            Some("A".into()),
            Some("b@c.d".into()),
            Some("m".into()),
        )
        .unwrap();
        assert_eq!(
            message.mailto("me@x.org"),
            "mailto:me@x.org?subject=Contact%20from%20A\
             &body=Name%3A%20A%0AEmail%3A%20b%40c.d%0A%0AMessage%3A%0Am"
        );
    }

    #[test]
    fn missing_control_counts_as_missing_field() {
        assert_eq!(
            ContactMessage::from_fields(
                Some("A".into()),
                None,
                Some("m".into())
            ),
            Err(ContactError::MissingField(Field::Email))
        );
    }

    #[test]
    fn copy_uses_clipboard_api_when_present() {
        let f = fixture();
        f.host.click(f.copy);
        assert_eq!(
            f.host.clipboard().as_deref(),
            Some("kianoosh.vadaei@gmail.com")
        );
        // Toast waits for the write to resolve.
        assert_eq!(toasts(&f, NoticeKind::Success), 0);
        f.host.flush();
        assert_eq!(toasts(&f, NoticeKind::Success), 1);
        assert_eq!(f.host.copy_commands(), 0);
    }

    #[test]
    fn copy_falls_back_to_selection() {
        let f = fixture();
        f.host.disable_clipboard_api();
        assert_eq!(f.manager.copy_email(), CopyPath::Selection);
        assert_eq!(f.host.copy_commands(), 1);
        assert_eq!(
            f.host.clipboard().as_deref(),
            Some("kianoosh.vadaei@gmail.com")
        );
        assert_eq!(toasts(&f, NoticeKind::Success), 1);
        // The temporary textarea is gone.
        assert!(f
            .host
            .query(&Selector::tag("textarea"))
            .is_some_and(|t| t == f.fields[2]));
    }

    #[test]
    fn no_form_means_no_copy_control_either() {
        let host = MemoryHost::shared();
        let copy = host.insert_with_classes(
            host.body().unwrap(),
            "button",
            &[COPY_CLASS],
        );
        assert!(ContactFormManager::attach(
            &host,
            &ContactOptions::default(),
            &NotificationOptions::default()
        )
        .is_none());
        host.click(copy);
        host.flush();
        assert_eq!(host.clipboard(), None);
    }
}

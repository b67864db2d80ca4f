//! Connection form state and validation.

use std::collections::BTreeMap;

use crate::types::{Credentials, Transport};

pub const DEFAULT_PORT: u16 = 5985;

const MSG_SERVER: &str = "Server IP or hostname is required";
const MSG_USERNAME: &str = "Username is required";
const MSG_PASSWORD: &str = "Password is required";
const MSG_PORT: &str = "Valid port number (1-65535) is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Server,
    Username,
    Password,
    Port,
    Transport,
}

impl Field {
    pub const ORDER: [Field; 5] = [
        Field::Server,
        Field::Username,
        Field::Password,
        Field::Port,
        Field::Transport,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Server => "Server IP / Hostname",
            Field::Username => "Username",
            Field::Password => "Password",
            Field::Port => "WinRM Port",
            Field::Transport => "Auth Type",
        }
    }
}

/// Per-field validation messages, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, *m))
    }

    fn insert(&mut self, field: Field, msg: &'static str) {
        self.0.insert(field, msg);
    }

    fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msgs: Vec<&str> = self.0.values().copied().collect();
        f.write_str(&msgs.join("; "))
    }
}

/// Parse a port typed by the user; `None` unless it is an integer in 1..=65535.
pub fn parse_port(text: &str) -> Option<u16> {
    match text.trim().parse::<u32>() {
        Ok(n) if (1..=65535).contains(&n) => Some(n as u16),
        _ => None,
    }
}

/// Checks applied to every submission, whichever path built the credentials.
pub fn validate_credentials(c: &Credentials) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if c.server.trim().is_empty() {
        errors.insert(Field::Server, MSG_SERVER);
    }
    if c.username.trim().is_empty() {
        errors.insert(Field::Username, MSG_USERNAME);
    }
    if c.password.is_empty() {
        errors.insert(Field::Password, MSG_PASSWORD);
    }
    if c.port == 0 {
        errors.insert(Field::Port, MSG_PORT);
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[derive(Debug, Clone)]
pub struct ServerForm {
    pub server: String,
    pub username: String,
    pub password: String,
    pub port: String,
    pub transport: Transport,
    pub focus: Field,
    pub errors: FieldErrors,
}

impl Default for ServerForm {
    fn default() -> Self {
        Self {
            server: String::new(),
            username: String::new(),
            password: String::new(),
            port: DEFAULT_PORT.to_string(),
            transport: Transport::default(),
            focus: Field::Server,
            errors: FieldErrors::default(),
        }
    }
}

impl ServerForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill every field from stored credentials (saved-server selection).
    pub fn fill(&mut self, c: &Credentials) {
        self.server = c.server.clone();
        self.username = c.username.clone();
        self.password = c.password.clone();
        self.port = c.port.to_string();
        self.transport = c.transport;
        self.errors = FieldErrors::default();
    }

    pub fn focus_next(&mut self) {
        let i = Field::ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = Field::ORDER[(i + 1) % Field::ORDER.len()];
    }

    pub fn focus_prev(&mut self) {
        let i = Field::ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = Field::ORDER[(i + Field::ORDER.len() - 1) % Field::ORDER.len()];
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Server => &self.server,
            Field::Username => &self.username,
            Field::Password => &self.password,
            Field::Port => &self.port,
            Field::Transport => self.transport.as_str(),
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Server => Some(&mut self.server),
            Field::Username => Some(&mut self.username),
            Field::Password => Some(&mut self.password),
            Field::Port => Some(&mut self.port),
            Field::Transport => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let field = self.focus;
        if field == Field::Port && !c.is_ascii_digit() {
            return;
        }
        if let Some(s) = self.text_mut(field) {
            s.push(c);
            self.errors.clear(field);
        }
    }

    pub fn backspace(&mut self) {
        let field = self.focus;
        if let Some(s) = self.text_mut(field) {
            s.pop();
            self.errors.clear(field);
        }
    }

    pub fn cycle_transport(&mut self, forward: bool) {
        self.transport = if forward {
            self.transport.next()
        } else {
            self.transport.prev()
        };
    }

    /// Validate all fields. On failure the messages are kept on the form for display.
    pub fn validate(&mut self) -> Result<Credentials, FieldErrors> {
        let port = parse_port(&self.port);
        let creds = Credentials {
            server: self.server.trim().to_string(),
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            port: port.unwrap_or(0),
            transport: self.transport,
        };
        let mut errors = match validate_credentials(&creds) {
            Ok(()) => FieldErrors::default(),
            Err(e) => e,
        };
        if port.is_none() {
            errors.insert(Field::Port, MSG_PORT);
        }
        self.errors = errors.clone();
        if errors.is_empty() {
            Ok(creds)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ServerForm {
        let mut f = ServerForm::new();
        f.server = " 10.0.0.5 ".into();
        f.username = "admin".into();
        f.password = "x".into();
        f
    }

    #[test]
    fn defaults_match_winrm_http() {
        let f = ServerForm::new();
        assert_eq!(f.port, "5985");
        assert_eq!(f.transport, Transport::Ntlm);
    }

    #[test]
    fn empty_form_reports_each_required_field() {
        let mut f = ServerForm::new();
        let errs = f.validate().unwrap_err();
        assert_eq!(errs.get(Field::Server), Some(MSG_SERVER));
        assert_eq!(errs.get(Field::Username), Some(MSG_USERNAME));
        assert_eq!(errs.get(Field::Password), Some(MSG_PASSWORD));
        assert_eq!(errs.get(Field::Port), None);
        assert_eq!(f.errors, errs);
    }

    #[test]
    fn port_outside_range_is_rejected() {
        for bad in ["0", "65536", "70000", "", "abc", "-1"] {
            let mut f = filled();
            f.port = bad.into();
            let errs = f.validate().unwrap_err();
            assert_eq!(errs.get(Field::Port), Some(MSG_PORT), "port {bad:?}");
        }
        let mut f = filled();
        f.port = "65535".into();
        assert_eq!(f.validate().unwrap().port, 65535);
    }

    #[test]
    fn valid_form_trims_host_and_user() {
        let mut f = filled();
        let c = f.validate().unwrap();
        assert_eq!(c.server, "10.0.0.5");
        assert_eq!(c.port, 5985);
        assert!(f.errors.is_empty());
    }

    #[test]
    fn typing_clears_that_fields_error_only() {
        let mut f = ServerForm::new();
        let _ = f.validate();
        f.focus = Field::Username;
        f.insert_char('a');
        assert_eq!(f.errors.get(Field::Username), None);
        assert!(f.errors.get(Field::Server).is_some());
    }

    #[test]
    fn port_field_accepts_digits_only() {
        let mut f = ServerForm::new();
        f.focus = Field::Port;
        f.backspace();
        f.insert_char('x');
        f.insert_char('1');
        assert_eq!(f.port, "5981");
    }

    #[test]
    fn focus_wraps_around() {
        let mut f = ServerForm::new();
        f.focus_prev();
        assert_eq!(f.focus, Field::Transport);
        f.focus_next();
        assert_eq!(f.focus, Field::Server);
    }
}

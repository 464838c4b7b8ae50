//! Interactive terminal session driving the presenter.
//!
//! One line of input is one operator action. The drill-down panel behaves
//! like an overlay: while it is open only `open`, `back`, `help` and `quit`
//! are accepted.

use crate::commands::{Command, Notice, NoticeKind, Operator, Presenter};
use crate::error::AppError;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Users,
    Posts,
}

/// A parsed line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Help,
    Quit,
    SwitchTab(Tab),
    List,
    ShowForm,
    Authors,
    Set { field: String, value: String },
    Action(Command),
    Empty,
    Invalid(String),
}

const USER_FIELDS: &[&str] = &["name", "email", "age", "contact"];
const POST_FIELDS: &[&str] = &["title", "author", "body"];

/// Parse one line in the context of the active tab and panel.
pub fn parse_input(tab: Tab, panel_open: bool, line: &str) -> Input {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    let word = word.to_ascii_lowercase();

    match word.as_str() {
        "" => return Input::Empty,
        "help" | "?" => return Input::Help,
        "quit" | "exit" => return Input::Quit,
        _ => {}
    }

    if panel_open {
        return match word.as_str() {
            "open" => match parse_row(rest) {
                Ok(row) => Input::Action(Command::SelectUserPost(row)),
                Err(msg) => Input::Invalid(msg),
            },
            "back" => Input::Action(Command::CloseUserPosts),
            "list" => Input::List,
            _ => Input::Invalid("The news panel is open: use `open N` or `back`.".into()),
        };
    }

    match (word.as_str(), tab) {
        ("users", _) => Input::SwitchTab(Tab::Users),
        ("posts" | "news", _) => Input::SwitchTab(Tab::Posts),
        ("list", _) => Input::List,
        ("form", _) => Input::ShowForm,
        ("authors", _) => Input::Authors,
        ("select", _) => match parse_row(rest) {
            Ok(row) if tab == Tab::Users => Input::Action(Command::SelectUser(row)),
            Ok(row) => Input::Action(Command::SelectPost(row)),
            Err(msg) => Input::Invalid(msg),
        },
        ("set", _) => parse_set(tab, rest),
        ("add", Tab::Users) => Input::Action(Command::AddUser),
        ("add", Tab::Posts) => Input::Action(Command::AddPost),
        ("update", Tab::Users) => Input::Action(Command::UpdateUser),
        ("update", Tab::Posts) => Input::Action(Command::UpdatePost),
        ("delete", Tab::Users) => Input::Action(Command::DeleteUser),
        ("delete", Tab::Posts) => Input::Action(Command::DeletePost),
        ("clear", Tab::Users) => Input::Action(Command::ClearUserForm),
        ("clear", Tab::Posts) => Input::Action(Command::ClearPostForm),
        ("view", Tab::Users) => Input::Action(Command::ViewUserPosts),
        ("view", Tab::Posts) => Input::Invalid("`view` is only available on the users tab.".into()),
        _ => Input::Invalid(format!("Unknown command `{}`. Type `help`.", word)),
    }
}

/// Rows are shown 1-based.
fn parse_row(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("Expected a row number, got `{}`.", raw)),
    }
}

fn parse_set(tab: Tab, rest: &str) -> Input {
    let (field, value) = match rest.split_once(char::is_whitespace) {
        Some((f, v)) => (f.to_ascii_lowercase(), v.trim().to_string()),
        None => (rest.to_ascii_lowercase(), String::new()),
    };
    let allowed = match tab {
        Tab::Users => USER_FIELDS,
        Tab::Posts => POST_FIELDS,
    };
    if !allowed.contains(&field.as_str()) {
        return Input::Invalid(format!(
            "Unknown field `{}`; expected one of {}.",
            field,
            allowed.join(", ")
        ));
    }
    // `\n` in a typed body stands for a line break.
    let value = value.replace("\\n", "\n");
    Input::Set { field, value }
}

/// Operator backed by a line reader and a writer.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Next input line without its terminator, `None` at end of input.
    /// Bytes that are not UTF-8 become U+FFFD instead of ending the session.
    fn read_line(&mut self) -> Result<Option<String>, AppError> {
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{}", text) {
            log::error!("terminal write failed: {}", e);
        }
    }

    fn prompt(&mut self, text: &str) -> Result<(), AppError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> Operator for Terminal<R, W> {
    fn notify(&mut self, notice: Notice) {
        let tag = match notice.kind {
            NoticeKind::Info => "INFO",
            NoticeKind::Warning => "WARN",
            NoticeKind::Error => "ERROR",
        };
        self.say(&format!("[{}] {}: {}", tag, notice.title, notice.message));
    }

    fn confirm(&mut self, title: &str, prompt: &str) -> bool {
        if self.prompt(&format!("{}: {} [y/N] ", title, prompt)).is_err() {
            return false;
        }
        match self.read_line() {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}

const HELP: &str = "\
Commands:
  users | posts            switch tab (and show its list)
  list                     show the current list again
  select N                 select row N and load it into the form
  set FIELD VALUE          fill a form field
                             users: name, email, age, contact
                             posts: title, author, body (\\n = line break)
  form                     show the form
  authors                  show the names accepted as author
  add | update | delete    act on the form / selection
  clear                    empty the form
  view                     (users) open the selected user's news
  open N | back            (news panel) read article N / close the panel
  help | quit";

/// Run until `quit` or end of input.
pub fn run_session<R: BufRead, W: Write>(
    presenter: &mut Presenter,
    term: &mut Terminal<R, W>,
) -> Result<(), AppError> {
    let mut tab = Tab::Users;
    term.say("NEWS BLOG MANAGEMENT SYSTEM - type `help` for commands.");
    render_list(presenter, term, tab);

    loop {
        let panel_open = presenter.user_posts.is_some();
        let label = match (tab, panel_open) {
            (_, true) => "news-panel",
            (Tab::Users, false) => "users",
            (Tab::Posts, false) => "posts",
        };
        term.prompt(&format!("{}> ", label))?;
        let Some(line) = term.read_line()? else {
            break;
        };

        match parse_input(tab, panel_open, &line) {
            Input::Empty => {}
            Input::Help => term.say(HELP),
            Input::Quit => break,
            Input::SwitchTab(next) => {
                tab = next;
                render_list(presenter, term, tab);
            }
            Input::List => render_list(presenter, term, tab),
            Input::ShowForm => render_form(presenter, term, tab),
            Input::Authors => {
                let names = presenter.posts.author_choices.join(", ");
                term.say(&format!("Authors: {}", names));
            }
            Input::Set { field, value } => {
                set_field(presenter, tab, &field, value);
                render_form(presenter, term, tab);
            }
            Input::Action(cmd) => {
                let shows_detail = matches!(
                    cmd,
                    Command::SelectUser(_) | Command::SelectPost(_) | Command::SelectUserPost(_)
                );
                presenter.dispatch(term, cmd);
                if shows_detail {
                    render_detail(presenter, term, tab);
                } else {
                    render_list(presenter, term, tab);
                }
            }
            Input::Invalid(msg) => term.say(&msg),
        }
    }
    log::info!("session closed");
    Ok(())
}

fn set_field(presenter: &mut Presenter, tab: Tab, field: &str, value: String) {
    match tab {
        Tab::Users => {
            let form = &mut presenter.users.form;
            match field {
                "name" => form.name = value,
                "email" => form.email = value,
                "age" => form.age = value,
                "contact" => form.contact = value,
                _ => {}
            }
        }
        Tab::Posts => {
            let form = &mut presenter.posts.form;
            match field {
                "title" => form.title = value,
                "author" => form.author = value,
                "body" => form.body = value,
                _ => {}
            }
        }
    }
}

fn render_list<R: BufRead, W: Write>(presenter: &Presenter, term: &mut Terminal<R, W>, tab: Tab) {
    if let Some(panel) = &presenter.user_posts {
        term.say(&format!("== {} ==", panel.header));
        if panel.rows.is_empty() {
            term.say("  (no news)");
        }
        for (i, row) in panel.rows.iter().enumerate() {
            term.say(&format!(
                "{:>3}. {} | {} | {}",
                i + 1,
                row.title,
                row.created_at,
                row.preview
            ));
        }
        return;
    }

    match tab {
        Tab::Users => {
            term.say(&format!(
                "{:>4} {:<20} {:<28} {:>4} {:<14}",
                "#", "Username", "Email", "Age", "Contact"
            ));
            for (i, row) in presenter.users.rows.iter().enumerate() {
                term.say(&format!(
                    "{:>3}. {:<20} {:<28} {:>4} {:<14}",
                    i + 1,
                    row.name,
                    row.email,
                    row.age,
                    row.contact
                ));
            }
            let buttons = if presenter.users.mutations_enabled() {
                "enabled"
            } else {
                "disabled"
            };
            term.say(&format!(
                "state: {:?}, update/delete {}",
                presenter.users.state(),
                buttons
            ));
        }
        Tab::Posts => {
            for (i, row) in presenter.posts.rows.iter().enumerate() {
                term.say(&format!(
                    "{:>3}. {} | {} | {}\n     {}",
                    i + 1,
                    row.title,
                    row.created_at,
                    row.author,
                    row.preview
                ));
            }
            term.say(&format!("state: {:?}", presenter.posts.state()));
        }
    }
}

fn render_form<R: BufRead, W: Write>(presenter: &Presenter, term: &mut Terminal<R, W>, tab: Tab) {
    match tab {
        Tab::Users => {
            let f = &presenter.users.form;
            term.say(&format!(
                "User form: name={:?} email={:?} age={:?} contact={:?} ({:?})",
                f.name,
                f.email,
                f.age,
                f.contact,
                presenter.users.state()
            ));
        }
        Tab::Posts => {
            let f = &presenter.posts.form;
            term.say(&format!(
                "News form: title={:?} author={:?} ({:?})\n{}",
                f.title,
                f.author,
                presenter.posts.state(),
                f.body
            ));
        }
    }
}

fn render_detail<R: BufRead, W: Write>(presenter: &Presenter, term: &mut Terminal<R, W>, tab: Tab) {
    if let Some(panel) = &presenter.user_posts {
        if !panel.full_view.is_empty() {
            term.say(&panel.full_view);
        }
        return;
    }
    match tab {
        Tab::Users => render_form(presenter, term, tab),
        Tab::Posts => {
            if !presenter.posts.full_preview.is_empty() {
                term.say("-- Full News Preview --");
                term.say(&presenter.posts.full_preview);
            }
            render_form(presenter, term, tab);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tab_scoped_actions() {
        assert_eq!(
            parse_input(Tab::Users, false, "add"),
            Input::Action(Command::AddUser)
        );
        assert_eq!(
            parse_input(Tab::Posts, false, "  DELETE "),
            Input::Action(Command::DeletePost)
        );
        assert_eq!(
            parse_input(Tab::Posts, false, "select 2"),
            Input::Action(Command::SelectPost(1))
        );
    }

    #[test]
    fn rows_are_one_based() {
        assert!(matches!(
            parse_input(Tab::Users, false, "select 0"),
            Input::Invalid(_)
        ));
        assert!(matches!(
            parse_input(Tab::Users, false, "select x"),
            Input::Invalid(_)
        ));
    }

    #[test]
    fn set_keeps_rest_of_line_and_expands_newlines() {
        assert_eq!(
            parse_input(Tab::Posts, false, "set body first line\\nsecond line"),
            Input::Set {
                field: "body".into(),
                value: "first line\nsecond line".into()
            }
        );
        assert!(matches!(
            parse_input(Tab::Users, false, "set title x"),
            Input::Invalid(_)
        ));
    }

    #[test]
    fn panel_only_accepts_open_and_back() {
        assert_eq!(
            parse_input(Tab::Users, true, "open 1"),
            Input::Action(Command::SelectUserPost(0))
        );
        assert_eq!(
            parse_input(Tab::Users, true, "back"),
            Input::Action(Command::CloseUserPosts)
        );
        assert!(matches!(
            parse_input(Tab::Users, true, "add"),
            Input::Invalid(_)
        ));
        assert_eq!(parse_input(Tab::Users, true, "quit"), Input::Quit);
    }

    #[test]
    fn view_is_users_only() {
        assert_eq!(
            parse_input(Tab::Users, false, "view"),
            Input::Action(Command::ViewUserPosts)
        );
        assert!(matches!(
            parse_input(Tab::Posts, false, "view"),
            Input::Invalid(_)
        ));
    }
}

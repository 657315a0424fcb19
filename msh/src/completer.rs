use msh::help;
use msh::local_fs::local_readdir;
use msh::path::resolve;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;

pub struct MshHelper {
    cwd: String,
}

impl MshHelper {
    pub const fn new(cwd: String) -> Self {
        Self { cwd }
    }

    pub fn set_cwd(&mut self, cwd: &str) {
        if self.cwd != cwd {
            cwd.clone_into(&mut self.cwd);
        }
    }

    fn complete_path(&self, word: &str) -> Vec<Pair> {
        let (dir_part, partial) = word
            .rfind('/')
            .map_or(("", word), |i| (&word[..=i], &word[i + 1..]));

        let dir = match dir_part {
            "" => self.cwd.clone(),
            "/" => "/".to_string(),
            d => resolve(&self.cwd, d.trim_end_matches('/')),
        };

        let Ok(entries) = local_readdir(&dir) else {
            return Vec::new();
        };

        entries
            .into_iter()
            .filter(|e| e.name.starts_with(partial))
            .filter(|e| !e.is_hidden() || partial.starts_with('.'))
            .map(|e| {
                let display = if e.is_dir { format!("{}/", e.name) } else { e.name };
                Pair {
                    replacement: format!("{dir_part}{display}"),
                    display,
                }
            })
            .collect()
    }
}

impl Completer for MshHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];
        let (start, word) = find_word_start(line_to_cursor);
        let is_first_word = line_to_cursor[..start].trim().is_empty();

        let completions = if is_first_word {
            help::command_names()
                .filter(|name| name.starts_with(word))
                .map(|name| Pair {
                    display: name.to_string(),
                    replacement: name.to_string(),
                })
                .collect()
        } else {
            self.complete_path(word)
        };

        Ok((start, completions))
    }
}

fn find_word_start(line: &str) -> (usize, &str) {
    let start = line
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    (start, &line[start..])
}

impl Hinter for MshHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for MshHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Borrowed(hint)
    }
}

impl Validator for MshHelper {}

impl Helper for MshHelper {}

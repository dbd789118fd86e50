//! Interactive console browser.
//!
//! A numbered menu for setting filters and paging through the matching
//! posts. Input and output are generic so the loop can be driven from
//! tests or any other stream.
//!
//! ```text
//! Current filters:
//! 1. Keyword: None
//! 2. Start date: 2021-01-01
//! 3. End date: None
//!
//! Options:
//! 1. Set keyword filter
//! 2. Set start date (YYYY-MM-DD)
//! 3. Set end date (YYYY-MM-DD)
//! 4. Clear filters
//! 5. Show posts
//! 6. Exit
//! Enter choice:
//! ```

use std::io::{self, BufRead, Write};

use chrono::NaiveDateTime;

use crate::archive::Archive;
use crate::core::filter::{PostFilter, parse_filter_date};
use crate::error::ArchiveError;

/// Default number of posts shown before pausing.
pub const DEFAULT_PAGE_SIZE: usize = 20;

const SEPARATOR_WIDTH: usize = 50;

/// Console menu over a loaded archive.
///
/// # Example
///
/// ```rust
/// use postpack::archive::Archive;
/// use postpack::menu::Menu;
///
/// let archive = Archive::default();
/// let mut output = Vec::new();
/// Menu::new(&archive, "5\n6\n".as_bytes(), &mut output).run()?;
///
/// let text = String::from_utf8(output).unwrap();
/// assert!(text.contains("Displaying 0 posts:"));
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Menu<'a, R, W> {
    archive: &'a Archive,
    input: R,
    output: W,
    filter: PostFilter,
    page_size: usize,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    /// Creates a menu with no filters and the default page size.
    pub fn new(archive: &'a Archive, input: R, output: W) -> Self {
        Self {
            archive,
            input,
            output,
            filter: PostFilter::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets how many posts are shown before pausing. 0 shows all at once.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Returns the current filter.
    pub fn filter(&self) -> &PostFilter {
        &self.filter
    }

    /// Runs until the user picks "Exit" or the input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Loaded {} posts", self.archive.len())?;

        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Enter choice: ")? else {
                break;
            };

            match choice.trim() {
                "1" => {
                    let Some(keyword) = self.prompt("Enter keyword: ")? else {
                        break;
                    };
                    self.filter.keyword = Some(keyword.trim().to_string()).filter(|k| !k.is_empty());
                }
                "2" => {
                    let Some(date) = self.prompt("Enter start date (YYYY-MM-DD): ")? else {
                        break;
                    };
                    match parse_optional_date(&date) {
                        Ok(start) => self.filter.start = start,
                        Err(e) => writeln!(self.output, "Error: {e}")?,
                    }
                }
                "3" => {
                    let Some(date) = self.prompt("Enter end date (YYYY-MM-DD): ")? else {
                        break;
                    };
                    match parse_optional_date(&date) {
                        Ok(end) => self.filter.end = end,
                        Err(e) => writeln!(self.output, "Error: {e}")?,
                    }
                }
                "4" => self.filter = PostFilter::default(),
                "5" => self.show_posts()?,
                "6" => break,
                _ => writeln!(self.output, "Invalid choice")?,
            }
        }

        self.output.flush()
    }

    fn print_menu(&mut self) -> io::Result<()> {
        let keyword = self.filter.keyword.as_deref().unwrap_or("None");
        let start = describe_date(self.filter.start);
        let end = describe_date(self.filter.end);

        writeln!(self.output)?;
        writeln!(self.output, "Current filters:")?;
        writeln!(self.output, "1. Keyword: {keyword}")?;
        writeln!(self.output, "2. Start date: {start}")?;
        writeln!(self.output, "3. End date: {end}")?;
        writeln!(self.output)?;
        writeln!(self.output, "Options:")?;
        writeln!(self.output, "1. Set keyword filter")?;
        writeln!(self.output, "2. Set start date (YYYY-MM-DD)")?;
        writeln!(self.output, "3. Set end date (YYYY-MM-DD)")?;
        writeln!(self.output, "4. Clear filters")?;
        writeln!(self.output, "5. Show posts")?;
        writeln!(self.output, "6. Exit")
    }

    fn show_posts(&mut self) -> io::Result<()> {
        let archive = self.archive;
        let posts = archive.filter(&self.filter);
        writeln!(self.output)?;
        writeln!(self.output, "Displaying {} posts:", posts.len())?;

        for (index, post) in posts.iter().enumerate() {
            writeln!(self.output)?;
            writeln!(self.output, "[{}]", post.timestamp().to_display_string())?;
            writeln!(self.output, "{}", post.content())?;
            writeln!(self.output, "{}", "-".repeat(SEPARATOR_WIDTH))?;

            let shown = index + 1;
            if self.page_size > 0 && shown % self.page_size == 0 && shown < posts.len() {
                let prompt = format!(
                    "-- {shown} of {} shown. Enter for more, q to return --",
                    posts.len()
                );
                match self.prompt(&prompt)? {
                    Some(answer) if !answer.trim().eq_ignore_ascii_case("q") => {}
                    _ => break,
                }
            }
        }
        Ok(())
    }

    /// Prints `message` and reads one line. `None` means end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

fn parse_optional_date(input: &str) -> Result<Option<NaiveDateTime>, ArchiveError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_filter_date(input).map(Some)
}

fn describe_date(date: Option<NaiveDateTime>) -> String {
    date.map_or_else(|| "None".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

use crate::game::Category;
use include_dir::{include_dir, Dir};
use rand::{seq::SliceRandom, Rng};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

static WORDS_DIR: Dir = include_dir!("src/words");

#[derive(Debug, Error)]
pub enum WordBankError {
    #[error("word list {0} not found")]
    Missing(String),
    #[error("word list {0} is not valid UTF-8")]
    Encoding(String),
    #[error("unable to parse word list {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("word list {0} has no words")]
    Empty(String),
    #[error("word list {0} contains a blank word")]
    BlankWord(String),
}

#[allow(dead_code)]
#[derive(Deserialize, Clone, Debug)]
struct WordList {
    name: String,
    words: Vec<String>,
}

/// Candidate words per category, loaded once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct WordBank {
    lists: HashMap<Category, Vec<String>>,
}

impl WordBank {
    /// Load every category from the word lists embedded in the binary.
    pub fn load() -> Result<Self, WordBankError> {
        let mut lists = HashMap::new();
        for category in Category::ALL {
            let file_name = format!("{}.json", category.slug());
            lists.insert(category, read_word_list(&file_name)?);
        }
        Ok(Self { lists })
    }

    /// Build a bank from explicit lists. Blank words are dropped, since a
    /// blank seed word has no last letter to chain from.
    pub fn from_lists<I, W>(lists: I) -> Self
    where
        I: IntoIterator<Item = (Category, Vec<W>)>,
        W: Into<String>,
    {
        Self {
            lists: lists
                .into_iter()
                .map(|(category, words)| {
                    let words = words
                        .into_iter()
                        .map(Into::into)
                        .filter(|word: &String| !word.trim().is_empty())
                        .collect();
                    (category, words)
                })
                .collect(),
        }
    }

    pub fn words(&self, category: Category) -> &[String] {
        self.lists.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Uniformly random word from `category`, or `None` if the list is empty.
    pub fn pick<R: Rng + ?Sized>(&self, category: Category, rng: &mut R) -> Option<&str> {
        self.words(category).choose(rng).map(String::as_str)
    }
}

fn read_word_list(file_name: &str) -> Result<Vec<String>, WordBankError> {
    let file = WORDS_DIR
        .get_file(file_name)
        .ok_or_else(|| WordBankError::Missing(file_name.to_string()))?;

    let contents = file
        .contents_utf8()
        .ok_or_else(|| WordBankError::Encoding(file_name.to_string()))?;

    parse_word_list(file_name, contents)
}

fn parse_word_list(file_name: &str, contents: &str) -> Result<Vec<String>, WordBankError> {
    let list: WordList = serde_json::from_str(contents).map_err(|source| WordBankError::Parse {
        file: file_name.to_string(),
        source,
    })?;

    if list.words.is_empty() {
        return Err(WordBankError::Empty(file_name.to_string()));
    }

    if list.words.iter().any(|word| word.trim().is_empty()) {
        return Err(WordBankError::BlankWord(file_name.to_string()));
    }

    Ok(list.words)
}

use std::collections::{BTreeMap, BTreeSet};

use crate::error::Error;

const LOWER_LATIN: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER_LATIN: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LATIN: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const ALPHANUMERIC: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SPECIAL: &str = "^°!\"§$%&/()=?´`{[]}\\+*~#'-_.:,;><|";
const SIMPLE_SPECIAL: &str = "!\"§$%&/()=?{[]}\\+*#'-_.:,;><|";
const COMPLEX_SPECIAL: &str = "^°`´~";
const BINARY: &str = "01";
const HEX: &str = "0123456789abcdef";
const SIBBO: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ23456789abcdef0123456789!\"§$%&/()=?{[]}\\+*#'-_.:,;><|";

pub struct CharacterGroups {
    groups: BTreeMap<&'static str, Vec<char>>,
}

impl CharacterGroups {
    pub fn new() -> Self {
        let mut groups: BTreeMap<&'static str, Vec<char>> = BTreeMap::new();

        groups.insert("alphabet", LATIN.chars().collect());
        groups.insert("a-zA-Z", LATIN.chars().collect());
        groups.insert("alphanumeric", ALPHANUMERIC.chars().collect());
        groups.insert("a-zA-Z0-9", ALPHANUMERIC.chars().collect());
        groups.insert("a-z", LOWER_LATIN.chars().collect());
        groups.insert("A-Z", UPPER_LATIN.chars().collect());
        groups.insert("0-9", DIGITS.chars().collect());
        groups.insert("special", SPECIAL.chars().collect());
        groups.insert("simpleSpecial", SIMPLE_SPECIAL.chars().collect());
        groups.insert("complexSpecial", COMPLEX_SPECIAL.chars().collect());
        groups.insert("01", BINARY.chars().collect());
        groups.insert("0x", HEX.chars().collect());
        groups.insert("sibbo", SIBBO.chars().collect());

        let all: BTreeSet<char> = groups.values().flatten().copied().collect();
        groups.insert("all", all.into_iter().collect());

        Self { groups }
    }

    pub fn get(&self, name: &str) -> Option<&[char]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.groups.keys().copied()
    }
}

impl Default for CharacterGroups {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlphabetOp {
    AddChars(String),
    RemoveChars(String),
    AddGroup(String),
    RemoveGroup(String),
}

pub struct AlphabetBuilder<'a> {
    groups: &'a CharacterGroups,
    set: BTreeSet<char>,
}

impl<'a> AlphabetBuilder<'a> {
    pub fn new(groups: &'a CharacterGroups) -> Self {
        Self {
            groups,
            set: BTreeSet::new(),
        }
    }

    pub fn apply(&mut self, op: &AlphabetOp) -> Result<(), Error> {
        match op {
            AlphabetOp::AddChars(chars) => {
                self.set.extend(chars.chars());
            }
            AlphabetOp::RemoveChars(chars) => {
                for c in chars.chars() {
                    self.set.remove(&c);
                }
            }
            AlphabetOp::AddGroup(name) => {
                let group = self.lookup(name)?;
                self.set.extend(group.iter().copied());
            }
            AlphabetOp::RemoveGroup(name) => {
                let group = self.lookup(name)?;
                for c in group {
                    self.set.remove(c);
                }
            }
        }

        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<&'a [char], Error> {
        self.groups
            .get(name)
            .ok_or_else(|| Error::UnknownGroup(name.to_string()))
    }

    // An empty selection falls back to lowercase latin, so the finalized
    // alphabet is never empty.
    pub fn finalize(self) -> Vec<char> {
        if self.set.is_empty() {
            LOWER_LATIN.chars().collect()
        } else {
            self.set.into_iter().collect()
        }
    }
}

//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of August.
//! The August project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! Small built-in English tables used by the text primitives.
//!
//! Keys are lowercase. Lookups go through [`lookup`] and [`lookup_char`].

pub(crate) type WordTable = &'static [(&'static str, &'static [&'static str])];
pub(crate) type CharTable = &'static [(char, &'static [char])];

pub(crate) static SYNONYMS: WordTable = &[
    ("big", &["large", "huge", "great"]),
    ("small", &["little", "tiny", "minor"]),
    ("quick", &["fast", "rapid", "swift"]),
    ("fast", &["quick", "rapid", "speedy"]),
    ("slow", &["sluggish", "unhurried"]),
    ("happy", &["glad", "cheerful", "content"]),
    ("sad", &["unhappy", "gloomy", "sorrowful"]),
    ("good", &["fine", "great", "decent"]),
    ("bad", &["poor", "awful", "terrible"]),
    ("begin", &["start", "commence"]),
    ("start", &["begin", "launch"]),
    ("end", &["finish", "close"]),
    ("smart", &["clever", "bright", "sharp"]),
    ("easy", &["simple", "effortless"]),
    ("hard", &["difficult", "tough"]),
    ("old", &["aged", "ancient", "elderly"]),
    ("new", &["fresh", "novel", "recent"]),
    ("jump", &["leap", "hop", "spring"]),
    ("jumps", &["leaps", "hops", "springs"]),
    ("run", &["sprint", "race", "dash"]),
    ("walk", &["stroll", "stride"]),
    ("look", &["glance", "peek", "watch"]),
    ("say", &["state", "tell", "speak"]),
    ("said", &["stated", "told", "remarked"]),
    ("lazy", &["idle", "sluggish", "inactive"]),
    ("beautiful", &["pretty", "lovely", "gorgeous"]),
    ("angry", &["mad", "furious", "irate"]),
    ("quiet", &["silent", "calm", "hushed"]),
    ("loud", &["noisy", "booming"]),
    ("help", &["assist", "aid", "support"]),
    ("show", &["display", "present", "reveal"]),
    ("buy", &["purchase", "acquire"]),
    ("answer", &["reply", "response"]),
    ("idea", &["notion", "concept", "thought"]),
    ("house", &["home", "residence", "dwelling"]),
    ("car", &["automobile", "vehicle"]),
    ("dog", &["hound", "canine", "pup"]),
    ("brown", &["tan", "chestnut", "umber"]),
];

pub(crate) static ANTONYMS: WordTable = &[
    ("big", &["small"]),
    ("small", &["big"]),
    ("large", &["small"]),
    ("quick", &["slow"]),
    ("fast", &["slow"]),
    ("slow", &["fast"]),
    ("happy", &["sad"]),
    ("sad", &["happy"]),
    ("good", &["bad"]),
    ("bad", &["good"]),
    ("hot", &["cold"]),
    ("cold", &["hot"]),
    ("up", &["down"]),
    ("down", &["up"]),
    ("open", &["closed"]),
    ("closed", &["open"]),
    ("light", &["dark", "heavy"]),
    ("dark", &["light"]),
    ("early", &["late"]),
    ("late", &["early"]),
    ("easy", &["hard"]),
    ("hard", &["easy", "soft"]),
    ("old", &["new", "young"]),
    ("new", &["old"]),
    ("young", &["old"]),
    ("begin", &["end"]),
    ("end", &["begin"]),
    ("always", &["never"]),
    ("never", &["always"]),
    ("true", &["false"]),
    ("false", &["true"]),
    ("win", &["lose"]),
    ("lose", &["win"]),
    ("lazy", &["diligent", "active"]),
    ("loud", &["quiet"]),
    ("quiet", &["loud"]),
    ("rich", &["poor"]),
    ("poor", &["rich"]),
    ("increase", &["decrease"]),
    ("decrease", &["increase"]),
    ("before", &["after"]),
    ("after", &["before"]),
];

pub(crate) static MISSPELLINGS: WordTable = &[
    ("the", &["teh", "th", "hte"]),
    ("quick", &["quikc", "qiuck", "quik"]),
    ("brown", &["borwn", "brwon"]),
    ("because", &["becuase", "becasue", "beacuse"]),
    ("receive", &["recieve", "receve"]),
    ("believe", &["beleive", "belive"]),
    ("separate", &["seperate", "separete"]),
    ("definitely", &["definately", "definitly"]),
    ("government", &["goverment", "governmnet"]),
    ("which", &["wich", "whcih"]),
    ("their", &["thier", "there"]),
    ("there", &["their", "ther"]),
    ("friend", &["freind", "frend"]),
    ("beginning", &["begining", "beggining"]),
    ("tomorrow", &["tommorow", "tomorow"]),
    ("necessary", &["neccessary", "necesary"]),
    ("address", &["adress", "addres"]),
    ("really", &["realy", "relly"]),
    ("until", &["untill", "untl"]),
    ("would", &["woudl", "wuold"]),
    ("about", &["abotu", "abuot"]),
    ("with", &["wiht", "whit"]),
    ("and", &["adn", "nad"]),
    ("over", &["ovre", "oevr"]),
    ("lazy", &["lazzy", "laxy"]),
    ("jumps", &["jmups", "jumsp"]),
];

/// Characters OCR engines commonly confuse.
pub(crate) static OCR_CONFUSIONS: CharTable = &[
    ('0', &['o', 'O', 'D']),
    ('1', &['l', 'I', 'i']),
    ('2', &['z', 'Z']),
    ('5', &['s', 'S']),
    ('6', &['b', 'G']),
    ('8', &['B']),
    ('9', &['g', 'q']),
    ('a', &['o']),
    ('b', &['6', 'h']),
    ('e', &['c']),
    ('g', &['9', 'q']),
    ('i', &['1', 'l']),
    ('l', &['1', 'I']),
    ('m', &['n', 'r']),
    ('n', &['m', 'h']),
    ('o', &['0', 'c']),
    ('q', &['9', 'g']),
    ('s', &['5', '$']),
    ('t', &['f', '7']),
    ('u', &['v', 'n']),
    ('z', &['2']),
    ('B', &['8', 'E']),
    ('D', &['0', 'O']),
    ('G', &['6', 'C']),
    ('I', &['1', 'l']),
    ('O', &['0', 'D']),
    ('S', &['5', '8']),
    ('Z', &['2']),
];

/// Neighbouring keys on a QWERTY layout, lowercase.
pub(crate) static KEYBOARD_NEIGHBOURS: CharTable = &[
    ('q', &['w', 'a', '1', '2']),
    ('w', &['q', 'e', 'a', 's', '2', '3']),
    ('e', &['w', 'r', 's', 'd', '3', '4']),
    ('r', &['e', 't', 'd', 'f', '4', '5']),
    ('t', &['r', 'y', 'f', 'g', '5', '6']),
    ('y', &['t', 'u', 'g', 'h', '6', '7']),
    ('u', &['y', 'i', 'h', 'j', '7', '8']),
    ('i', &['u', 'o', 'j', 'k', '8', '9']),
    ('o', &['i', 'p', 'k', 'l', '9', '0']),
    ('p', &['o', 'l', '0']),
    ('a', &['q', 'w', 's', 'z']),
    ('s', &['a', 'd', 'w', 'e', 'z', 'x']),
    ('d', &['s', 'f', 'e', 'r', 'x', 'c']),
    ('f', &['d', 'g', 'r', 't', 'c', 'v']),
    ('g', &['f', 'h', 't', 'y', 'v', 'b']),
    ('h', &['g', 'j', 'y', 'u', 'b', 'n']),
    ('j', &['h', 'k', 'u', 'i', 'n', 'm']),
    ('k', &['j', 'l', 'i', 'o', 'm']),
    ('l', &['k', 'o', 'p']),
    ('z', &['a', 's', 'x']),
    ('x', &['z', 'c', 's', 'd']),
    ('c', &['x', 'v', 'd', 'f']),
    ('v', &['c', 'b', 'f', 'g']),
    ('b', &['v', 'n', 'g', 'h']),
    ('n', &['b', 'm', 'h', 'j']),
    ('m', &['n', 'j', 'k']),
];

pub(crate) fn lookup(table: WordTable, word: &str) -> Option<&'static [&'static str]> {
    table
        .iter()
        .find(|(key, _)| *key == word)
        .map(|(_, values)| *values)
}

pub(crate) fn lookup_char(table: CharTable, c: char) -> Option<&'static [char]> {
    table
        .iter()
        .find(|(key, _)| *key == c)
        .map(|(_, values)| *values)
}

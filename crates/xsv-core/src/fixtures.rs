//! Record types shared by the unit tests

use crate::error::Result;
use crate::record::RowCollection;
use crate::xsv_record;
use crate::value::{
    enum_name, flags_text, parse_enum, parse_flags, FieldEnum, FieldFlags, FieldValue,
};

pub const FIXTURE_CSV: &str =
    "10,Bob,State of Connecticut\n100,Michael,\"Manhattan Borough\nNew York County\"\n";
pub const FIXTURE_CSV_WITH_HEADER: &str =
    "id,name,place\n10,Bob,State of Connecticut\n100,Michael,\"Manhattan Borough\nNew York County\"\n";
pub const FIXTURE_CSV_SAME_ID: &str =
    "10,Bob,State of Connecticut\n100,Michael,\"Manhattan Borough\nNew York County\"\n10,Tom,Seattle";
pub const FIXTURE_CSV_SAME_ID_WITH_HEADER: &str =
    "id,name,place\n10,Bob,State of Connecticut\n100,Michael,\"Manhattan Borough\nNew York County\"\n10,Tom,Seattle";
pub const MANHATTAN: &str = "Manhattan Borough\nNew York County";

xsv_record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Person {
        #[column(index = 0, name = "id")]
        pub id: i32,
        #[column(index = 1, name = "name")]
        pub name: String,
        #[column(index = 2, name = "place")]
        pub place: String,
    }
    key id: i32
}

xsv_record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Item {
        #[column(index = 0)]
        pub hash: String,
        #[column(index = 1)]
        pub size: i32,
    }
}

xsv_record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct NamedItem {
        #[column(name = "hash")]
        pub hash: String,
        #[column(name = "size")]
        pub size: i32,
    }
}

/// Collection wrapper holding the rows of an item table
#[derive(Debug, Default)]
pub struct ItemTable {
    pub items: Vec<Item>,
}

impl RowCollection for ItemTable {
    type Item = Item;

    fn from_records(records: Vec<Item>) -> Self {
        Self { items: records }
    }

    fn records(&self) -> &[Item] {
        &self.items
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Fruit {
    #[default]
    Apple,
    Bar,
}

impl FieldEnum for Fruit {
    const TYPE_NAME: &'static str = "Fruit";
    const MEMBERS: &'static [(&'static str, Self)] = &[("Apple", Fruit::Apple), ("Bar", Fruit::Bar)];
}

impl FieldValue for Fruit {
    fn from_field(raw: &str) -> Result<Self> {
        parse_enum(raw)
    }

    fn to_field(&self) -> String {
        enum_name(self)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Access(pub u64);

impl FieldFlags for Access {
    const TYPE_NAME: &'static str = "Access";
    const MEMBERS: &'static [(&'static str, u64)] = &[("None", 0), ("Foo", 1), ("Bar", 2), ("Baz", 4)];

    fn from_bits(bits: u64) -> Self {
        Access(bits)
    }

    fn bits(&self) -> u64 {
        self.0
    }
}

impl FieldValue for Access {
    fn from_field(raw: &str) -> Result<Self> {
        parse_flags(raw)
    }

    fn to_field(&self) -> String {
        flags_text(self)
    }
}

xsv_record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Tagged {
        #[column(index = 0, name = "fruit")]
        pub fruit: Fruit,
        #[column(index = 1, name = "access")]
        pub access: Access,
    }
}

xsv_record! {
    #[derive(Debug, Clone, Default)]
    pub struct Gappy {
        #[column(index = 0)]
        pub first: String,
        #[column(index = 2)]
        pub third: String,
    }
}

xsv_record! {
    #[derive(Debug, Clone, Default)]
    pub struct Twice {
        #[column(index = 0)]
        pub left: String,
        #[column(index = 0)]
        pub right: String,
    }
}

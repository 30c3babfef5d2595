use std::{collections::HashMap, marker::PhantomData};

use sensitive::Sensitive;

#[derive(Sensitive)]
struct Item {
    #[sensitive("data")]
    label: String,
}

#[derive(Sensitive)]
struct Page<K, T> {
    #[sensitive("dive")]
    items: HashMap<K, T>,
    cursor: Option<K>,
    marker: PhantomData<T>,
}

fn main() {
    let _ = sensitive::check::<Page<String, Item>>();
}

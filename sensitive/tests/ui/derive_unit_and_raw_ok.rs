use sensitive::Sensitive;

#[derive(Sensitive)]
struct Marker;

#[derive(Sensitive)]
struct Keyword {
    #[sensitive("data")]
    r#type: String,
    #[sensitive("data")]
    _internal: String,
}

fn main() {
    let _ = sensitive::check::<Marker>();
    let _ = sensitive::field_tag::<Keyword>("type");
}

use sensitive::Sensitive;

#[derive(Sensitive)]
struct Account {
    #[pii = "subjectID"]
    id: u64,
    #[sens("data")]
    nickname: String,
    #[pii("data")]
    #[sensitive("data,kind=email")]
    email: String,
}

fn main() {
    let _ = sensitive::check::<Account>();
}

use std::collections::{BTreeMap, HashMap, VecDeque};

use sensitive::Sensitive;

#[derive(Sensitive)]
struct Device {
    #[sensitive("data,kind=ipv4_addr")]
    ip_addr: String,
}

#[derive(Sensitive)]
struct Profile {
    #[sensitive("subjectID,prefix=user-")]
    id: String,
    #[sensitive("data,kind=email")]
    email: String,
    #[sensitive("data")]
    phone: Option<String>,
    #[sensitive("dive")]
    primary: Option<Box<Device>>,
    #[sensitive("dive")]
    devices: Vec<Device>,
    #[sensitive("dive")]
    history: VecDeque<Option<Device>>,
    #[sensitive("dive")]
    by_name: HashMap<String, Device>,
    #[sensitive("dive")]
    by_rank: BTreeMap<u32, Box<Device>>,
    created_at: u64,
}

fn main() {
    let mut profile = Profile {
        id: "abc".to_string(),
        email: "jane@example.com".to_string(),
        phone: None,
        primary: None,
        devices: Vec::new(),
        history: VecDeque::new(),
        by_name: HashMap::new(),
        by_rank: BTreeMap::new(),
        created_at: 0,
    };
    let _ = sensitive::redact(&mut profile);
    let _ = profile.created_at;
}

//! End-to-end tests for type-level introspection: the existence check, the
//! scanned descriptors and field annotation lookup.

use std::marker::PhantomData;

use sensitive::{ConfigError, Container, Error, Role, Scanner, Sensitive, check, field_tag};

#[derive(Debug, Sensitive)]
struct Address {
    #[sensitive("data")]
    street: String,
}

#[derive(Debug, Sensitive)]
struct InvalidTag {
    #[sensitive("invalid")]
    data: String,
}

#[derive(Debug, Sensitive)]
struct InvalidSubject {
    #[sensitive("subjectID")]
    subject: String,
    #[sensitive("subjectID")]
    subject2: String,
}

mod existence {
    use super::*;

    #[test]
    fn records_with_data_fields_are_sensitive() {
        assert!(check::<Address>().unwrap());
        assert!(check::<Option<Address>>().unwrap());
        assert!(check::<Box<Address>>().unwrap());
    }

    #[test]
    fn records_reaching_data_through_dive_are_sensitive() {
        #[derive(Debug, Sensitive)]
        struct Holder {
            #[sensitive("dive")]
            address: Address,
        }

        assert!(check::<Holder>().unwrap());
    }

    #[test]
    fn records_without_annotations_are_not_sensitive() {
        #[derive(Debug, Sensitive)]
        struct Plain {
            value: String,
        }

        assert!(!check::<Plain>().unwrap());
    }

    #[test]
    fn data_annotations_on_non_text_fields_are_ignored() {
        #[derive(Debug, Sensitive)]
        struct Opaque {
            #[sensitive("data")]
            value: (),
        }

        assert!(!check::<Opaque>().unwrap());
    }

    #[test]
    fn hidden_fields_are_ignored() {
        #[derive(Debug, Sensitive)]
        struct Hidden {
            #[sensitive("data")]
            _secret: String,
        }

        assert!(!check::<Hidden>().unwrap());
    }

    #[test]
    fn collections_are_unsupported() {
        assert!(matches!(
            check::<Vec<Address>>().unwrap_err(),
            Error::UnsupportedType(_)
        ));
    }

    #[test]
    fn misconfigured_types_are_reported() {
        let err = check::<InvalidTag>().unwrap_err();
        assert!(err.is_misconfiguration());
        assert!(matches!(
            err,
            Error::InvalidTagConfiguration(ConfigError::UnknownRole { ref role, .. }) if role == "invalid"
        ));

        let err = check::<InvalidSubject>().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTagConfiguration(ConfigError::MultipleSubjectId {
                first: "subject",
                second: "subject2",
                ..
            })
        ));
    }
}

mod descriptors {
    use super::*;

    #[derive(Debug, Sensitive)]
    struct Device {
        #[pii("data,kind=ipv4_addr")]
        ip_addr: String,
    }

    #[derive(Debug, Sensitive)]
    struct Profile {
        #[sensitive("subjectID,prefix=user-")]
        id: String,
        created_at: u64,
        #[sens("data,kind=email")]
        email: String,
        #[sensitive("dive")]
        devices: Vec<Device>,
    }

    #[derive(Debug, Sensitive)]
    struct Page<T> {
        #[sensitive("dive")]
        items: Vec<T>,
        marker: PhantomData<T>,
    }

    #[test]
    fn descriptors_list_annotated_fields_in_order() {
        let scanner = Scanner::new();
        let descriptor = scanner.scan::<Profile>().unwrap();
        assert_eq!(descriptor.name(), "Profile");
        assert!(descriptor.has_sensitive());

        let subject = descriptor.subject().unwrap();
        assert_eq!(subject.name(), "id");
        assert_eq!(subject.prefix(), "user-");

        let fields = descriptor.fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name(), "email");
        assert_eq!(fields[0].role(), Role::Data);
        assert_eq!(fields[0].kind(), "email");
        assert_eq!(fields[1].name(), "devices");
        assert_eq!(fields[1].role(), Role::Dive);
        assert_eq!(fields[1].container(), Container::Sequence);
    }

    #[test]
    fn nested_types_are_cached_with_their_parent() {
        let scanner = Scanner::new();
        scanner.scan::<Profile>().unwrap();
        assert_eq!(scanner.len(), 2);

        let device = scanner.scan::<Device>().unwrap();
        assert_eq!(device.fields()[0].kind(), "ipv4_addr");
        assert_eq!(scanner.len(), 2);
    }

    #[test]
    fn generic_records_are_scanned_per_instantiation() {
        let scanner = Scanner::new();
        assert!(scanner.check::<Page<Device>>().unwrap());
        assert!(scanner.check::<Page<Profile>>().unwrap());
        assert_eq!(scanner.len(), 4);
    }

    #[test]
    fn failed_scans_leave_the_cache_untouched() {
        #[derive(Debug, Sensitive)]
        struct Broken {
            #[sensitive("dive")]
            device: Device,
            #[sensitive("invalid")]
            name: String,
        }

        let scanner = Scanner::new();
        assert!(scanner.scan::<Broken>().is_err());
        assert!(scanner.is_empty());
    }
}

mod annotations {
    use super::*;

    #[derive(Debug, Sensitive)]
    struct Tagged {
        #[pii("data")]
        #[sensitive("data,kind=email")]
        email: String,
        #[sensitive("")]
        #[sens("subjectID")]
        id: String,
        untagged: String,
    }

    #[test]
    fn highest_priority_identifier_wins() {
        let payload = field_tag::<Tagged>("email").unwrap().unwrap();
        assert_eq!(payload.id, "sensitive");
        assert_eq!(payload.role(), Some(Role::Data));
        assert_eq!(payload.options.get("kind"), "email");
    }

    #[test]
    fn empty_annotations_fall_through() {
        let payload = field_tag::<Tagged>("id").unwrap().unwrap();
        assert_eq!(payload.id, "sens");
        assert_eq!(payload.role(), Some(Role::SubjectId));
    }

    #[test]
    fn untagged_and_unknown_fields() {
        assert!(field_tag::<Tagged>("untagged").unwrap().is_none());
        assert!(matches!(
            field_tag::<Tagged>("missing").unwrap_err(),
            Error::FieldNotFound { record: "Tagged", .. }
        ));
    }
}

//! 参会名单查询服务（只读）

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use rsvp_shared::error::Result;
use tracing::{debug, instrument};

use crate::models::{InviteCode, Mapping, Registration, normalize_code};
use crate::service::dto::{Attendee, AttendeeListing, CodeGroup, CodeRoster};
use crate::store::RegistrationStore;

/// 名单查询服务
pub struct ListingService {
    store: Arc<dyn RegistrationStore>,
    admin_password: Option<String>,
}

impl ListingService {
    pub fn new(store: Arc<dyn RegistrationStore>, admin_password: Option<String>) -> Self {
        Self {
            store,
            admin_password,
        }
    }

    /// 按邀请码分组列出所有参会者
    #[instrument(skip(self))]
    pub async fn list_attendees(&self) -> Result<AttendeeListing> {
        let registrations = self.load_registrations().await?;
        let total = registrations.len();

        let mut grouped: BTreeMap<String, Vec<Attendee>> = BTreeMap::new();
        for (email, registration) in registrations {
            grouped.entry(registration.code).or_default().push(Attendee {
                name: registration.name,
                email,
            });
        }

        let groups = grouped
            .into_iter()
            .map(|(code, mut attendees)| {
                sort_attendees(&mut attendees);
                CodeGroup { code, attendees }
            })
            .collect();

        Ok(AttendeeListing { total, groups })
    }

    /// 单个邀请码的登记名单及剩余容量
    #[instrument(skip(self))]
    pub async fn roster_for_code(&self, code: &str) -> Result<CodeRoster> {
        let code = normalize_code(code);

        let remaining = match self.store.get_field(Mapping::Codes, &code).await? {
            Some(raw) => Some(InviteCode::from_stored(&code, &raw)?.remaining),
            None => None,
        };

        let mut attendees: Vec<Attendee> = self
            .load_registrations()
            .await?
            .into_iter()
            .filter(|(_, registration)| registration.code == code)
            .map(|(email, registration)| Attendee {
                name: registration.name,
                email,
            })
            .collect();
        sort_attendees(&mut attendees);

        Ok(CodeRoster {
            code,
            remaining,
            attendees,
        })
    }

    /// 原样导出一个映射
    ///
    /// 只接受 `codes` 和 `rsvp`，其他名称返回 `UnknownMapping`
    #[instrument(skip(self))]
    pub async fn dump(&self, key: &str) -> Result<HashMap<String, String>> {
        let mapping: Mapping = key.parse()?;
        let entries = self.store.get_all(mapping).await?;
        debug!(mapping = %mapping, entries = entries.len(), "Mapping dumped");
        Ok(entries)
    }

    /// 校验管理口令，未配置口令时始终失败
    pub fn verify_admin_password(&self, candidate: &str) -> bool {
        self.admin_password
            .as_deref()
            .is_some_and(|password| password == candidate)
    }

    async fn load_registrations(&self) -> Result<Vec<(String, Registration)>> {
        self.store
            .get_all(Mapping::Rsvp)
            .await?
            .into_iter()
            .map(|(email, raw)| {
                let registration = Registration::from_stored(&email, &raw)?;
                Ok((email, registration))
            })
            .collect()
    }
}

fn sort_attendees(attendees: &mut [Attendee]) {
    attendees.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.email.cmp(&b.email)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryRegistrationStore;

    async fn seeded_store() -> Arc<MemoryRegistrationStore> {
        let store = Arc::new(MemoryRegistrationStore::with_codes([("rds", 10), ("mvps", 0)]));
        for (email, name, code) in [
            ("linus@example.com", "Linus", "rds"),
            ("ada@example.com", "Ada", "rds"),
            ("grace@example.com", "Grace", "mvps"),
        ] {
            let record = Registration::new(name, code).to_stored().unwrap();
            store.set_field(Mapping::Rsvp, email, &record).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_list_attendees_groups_and_sorts() {
        let service = ListingService::new(seeded_store().await, None);

        let listing = service.list_attendees().await.unwrap();

        assert_eq!(listing.total, 3);
        let codes: Vec<_> = listing.groups.iter().map(|g| g.code.as_str()).collect();
        assert_eq!(codes, vec!["mvps", "rds"]);
        let names: Vec<_> = listing.groups[1].attendees.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Linus"]);
    }

    #[tokio::test]
    async fn test_roster_for_code() {
        let service = ListingService::new(seeded_store().await, None);

        let roster = service.roster_for_code("RDS").await.unwrap();
        assert_eq!(roster.code, "rds");
        assert_eq!(roster.remaining, Some(10));
        assert_eq!(roster.attendees.len(), 2);

        let unknown = service.roster_for_code("nope").await.unwrap();
        assert_eq!(unknown.remaining, None);
        assert!(unknown.attendees.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_registration_surfaces() {
        let store = seeded_store().await;
        store
            .set_field(Mapping::Rsvp, "broken@example.com", "{oops")
            .await
            .unwrap();
        let service = ListingService::new(store, None);

        let err = service.list_attendees().await.unwrap_err();
        assert_eq!(err.code(), "CORRUPT_RECORD");
    }

    #[tokio::test]
    async fn test_dump_rejects_unknown_mapping() {
        let service = ListingService::new(seeded_store().await, None);

        assert_eq!(service.dump("codes").await.unwrap().len(), 2);
        let err = service.dump("sessions").await.unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_MAPPING");
    }

    #[test]
    fn test_verify_admin_password() {
        let store = Arc::new(MemoryRegistrationStore::new());

        let open = ListingService::new(store.clone(), Some("letmein".to_string()));
        assert!(open.verify_admin_password("letmein"));
        assert!(!open.verify_admin_password("LETMEIN"));

        let closed = ListingService::new(store, None);
        assert!(!closed.verify_admin_password(""));
    }
}

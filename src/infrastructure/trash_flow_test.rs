#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::Utc;
    use tempfile::TempDir;
    use uuid::Uuid;

    use crate::application::ports::trash_ports::TrashUseCase;
    use crate::application::services::{TrashService, VersionSetService};
    use crate::common::config::{RetentionConfig, TimeoutConfig};
    use crate::common::errors::ErrorKind;
    use crate::common::locks::UserLockRegistry;
    use crate::domain::entities::trashed_item::{TrashedItem, TrashedItemType};
    use crate::domain::repositories::trash_repository::TrashRepository;
    use crate::infrastructure::repositories::trash_fs_repository::TrashFsRepository;
    use crate::infrastructure::services::fs_storage_view::FsStorageView;
    use crate::infrastructure::services::fs_version_store::FsVersionStore;
    use crate::infrastructure::services::trash_sweep_service::TrashSweepService;

    struct Harness {
        root: TempDir,
        service: Arc<TrashService>,
        repo: Arc<TrashFsRepository>,
        user: Uuid,
    }

    fn build() -> Harness {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let root = TempDir::new().unwrap();
        let view = Arc::new(FsStorageView::new(
            root.path().to_path_buf(),
            TimeoutConfig::default(),
        ));
        let version_store = Arc::new(FsVersionStore::new(view.clone()));
        let repo = Arc::new(TrashFsRepository::new(root.path()));

        let service = Arc::new(TrashService::new(
            repo.clone(),
            view.clone(),
            VersionSetService::new(view.clone(), Some(version_store)),
            Arc::new(UserLockRegistry::new(TimeoutConfig::default())),
            RetentionConfig::default(),
        ));

        Harness {
            root,
            service,
            repo,
            user: Uuid::new_v4(),
        }
    }

    fn user_path(h: &Harness, rel: &str) -> PathBuf {
        h.root.path().join(h.user.to_string()).join(rel)
    }

    fn write_file(h: &Harness, rel: &str, bytes: &[u8]) {
        let path = user_path(h, rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, bytes).unwrap();
    }

    fn read_file(h: &Harness, rel: &str) -> String {
        fs::read_to_string(user_path(h, rel)).unwrap()
    }

    #[tokio::test]
    async fn directory_round_trip_preserves_tree_and_versions() {
        let h = build();

        write_file(&h, "files/docs/a.txt", b"current");
        write_file(&h, "files/docs/sub/b.md", b"notes");
        write_file(&h, "files_versions/docs/a.txt.v1", b"first");
        write_file(&h, "files_versions/docs/a.txt.v2", b"second");

        // Move the whole directory into the bin
        let dto = h.service.move_to_trash(&h.user, "docs").await.unwrap();
        assert_eq!(dto.name, "docs");
        assert_eq!(dto.item_type, "dir");
        assert_eq!(dto.location, "/");
        assert!(dto.mime_type.is_none());

        let artifact = format!("files_trashbin/docs.d{}", dto.deleted_at);
        assert_eq!(read_file(&h, &format!("{}/a.txt", artifact)), "current");
        assert_eq!(read_file(&h, &format!("{}/sub/b.md", artifact)), "notes");
        assert_eq!(
            read_file(&h, "files/docs/a.txt"),
            "current",
            "the live copy stays until the deletion flow removes it"
        );
        assert!(!user_path(&h, "files_versions/docs").exists());

        let version_artifact = format!("versions_trashbin/docs.d{}", dto.deleted_at);
        assert_eq!(
            read_file(&h, &format!("{}/a.txt.v1", version_artifact)),
            "first"
        );
        assert_eq!(h.repo.list_for_user(&h.user).await.unwrap().len(), 1);

        // The surrounding deletion flow unlinks the original, then we bring
        // the held copy back
        fs::remove_dir_all(user_path(&h, "files/docs")).unwrap();
        let restored = h
            .service
            .restore(&h.user, "docs", dto.deleted_at)
            .await
            .unwrap();
        assert_eq!(restored.restored_name, "docs");
        assert_eq!(restored.restored_path, "/files/docs");
        assert!(restored.original_location_used);

        assert_eq!(read_file(&h, "files/docs/a.txt"), "current");
        assert_eq!(read_file(&h, "files/docs/sub/b.md"), "notes");
        assert_eq!(read_file(&h, "files_versions/docs/a.txt.v1"), "first");
        assert_eq!(read_file(&h, "files_versions/docs/a.txt.v2"), "second");
        assert!(!user_path(&h, &artifact).exists());
        assert!(h.repo.list_for_user(&h.user).await.unwrap().is_empty());

        // The row is gone, so asking again is an inconsistency
        let err = h
            .service
            .restore(&h.user, "docs", dto.deleted_at)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Inconsistency);
    }

    #[tokio::test]
    async fn restore_into_occupied_name_uses_restored_suffix() {
        let h = build();

        write_file(&h, "files/a.txt", b"old");
        write_file(&h, "files_versions/a.txt.v1", b"v1");

        let dto = h.service.move_to_trash(&h.user, "a.txt").await.unwrap();
        assert_eq!(dto.item_type, "file");
        assert_eq!(dto.mime_type.as_deref(), Some("text/plain"));

        // A new file takes the old name before the restore happens
        write_file(&h, "files/a.txt", b"new");

        let restored = h
            .service
            .restore(&h.user, "a.txt", dto.deleted_at)
            .await
            .unwrap();
        assert_eq!(restored.restored_name, "a.txt.restored");
        assert!(restored.original_location_used);

        assert_eq!(read_file(&h, "files/a.txt"), "new");
        assert_eq!(read_file(&h, "files/a.txt.restored"), "old");
        assert_eq!(read_file(&h, "files_versions/a.txt.restored.v1"), "v1");
    }

    #[tokio::test]
    async fn restore_falls_back_to_root_when_parent_is_gone() {
        let h = build();

        write_file(&h, "files/docs/a.txt", b"payload");
        let dto = h
            .service
            .move_to_trash(&h.user, "docs/a.txt")
            .await
            .unwrap();
        assert_eq!(dto.location, "/docs");

        fs::remove_dir_all(user_path(&h, "files/docs")).unwrap();

        let restored = h
            .service
            .restore(&h.user, "a.txt", dto.deleted_at)
            .await
            .unwrap();
        assert!(!restored.original_location_used);
        assert_eq!(restored.restored_path, "/files/a.txt");
        assert_eq!(read_file(&h, "files/a.txt"), "payload");
    }

    #[tokio::test]
    async fn expiry_sweeps_artifacts_versions_and_rows() {
        let h = build();

        write_file(&h, "files/a.txt", b"a");
        write_file(&h, "files_versions/a.txt.v1", b"a1");
        write_file(&h, "files/b.txt", b"b");

        let first = h.service.move_to_trash(&h.user, "a.txt").await.unwrap();
        let second = h.service.move_to_trash(&h.user, "b.txt").await.unwrap();
        assert!(first.deleted_at < second.deleted_at);

        // Only strictly older items fall at the cutoff
        let removed = h
            .service
            .expire_older_than(&h.user, second.deleted_at)
            .await
            .unwrap();
        assert_eq!(removed, 1);

        assert!(!user_path(&h, &format!("files_trashbin/a.txt.d{}", first.deleted_at)).exists());
        assert!(
            !user_path(
                &h,
                &format!("versions_trashbin/a.txt.v1.d{}", first.deleted_at)
            )
            .exists()
        );
        assert!(user_path(&h, &format!("files_trashbin/b.txt.d{}", second.deleted_at)).exists());

        let rows = h.repo.list_for_user(&h.user).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "b.txt");

        let removed = h
            .service
            .expire_older_than(&h.user, second.deleted_at + 1)
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(
            h.service
                .expire_older_than(&h.user, second.deleted_at + 1)
                .await
                .unwrap(),
            0
        );
        assert!(h.repo.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sweep_job_expires_on_its_first_pass() {
        let h = build();

        // A row 31 days old, past the default 30-day window
        let stamp = Utc::now().timestamp() - 31 * 24 * 60 * 60;
        h.repo
            .insert(&TrashedItem::new(
                h.user,
                "old.txt".to_string(),
                stamp,
                "/".to_string(),
                TrashedItemType::File,
                Some("text/plain".to_string()),
            ))
            .await
            .unwrap();
        let artifact = format!("files_trashbin/old.txt.d{}", stamp);
        write_file(&h, &artifact, b"stale");

        // The interval is clamped to an hour, so only the immediate first
        // pass can run within the test
        let sweeper =
            TrashSweepService::new(h.service.clone(), h.repo.clone(), Duration::from_secs(0));
        sweeper.start_sweep_job().await;

        let mut swept = false;
        for _ in 0..250 {
            if h.repo.list_for_user(&h.user).await.unwrap().is_empty() {
                swept = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(swept, "the first pass must run without waiting an interval");
        assert!(!user_path(&h, &artifact).exists());
    }
}

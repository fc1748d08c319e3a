//! Descriptor invariants: names, tags and connection parameters are pure
//! functions of the variant.

use lpn_core::database::{DatabaseImage, DB_NAME, DB_PASSWORD, LINK_ALIAS};
use lpn_core::liferay::{Portal, PortalImage};

#[test]
fn container_name_is_a_pure_function_of_the_variant() {
    assert_eq!(Portal::Ce.container_name(), "lpn-ce");
    assert_eq!(Portal::Commerce.container_name(), "lpn-commerce");
    assert_eq!(Portal::Dxp.container_name(), "lpn-dxp");
    assert_eq!(Portal::Nightly.container_name(), "lpn-nightly");
    assert_eq!(Portal::Release.container_name(), "lpn-release");

    // Two descriptors of the same variant always address the same container.
    let one = PortalImage::new(Portal::Dxp, Some("a".to_string()));
    let other = PortalImage::new(Portal::Dxp, Some("b".to_string()));
    assert_eq!(one.container_name(), other.container_name());
}

#[test]
fn missing_or_empty_tag_falls_back_to_the_variant_default() {
    let defaulted = PortalImage::new(Portal::Nightly, None);
    assert_eq!(defaulted.tag(), "latest");
    assert_eq!(
        defaulted.fully_qualified_name(),
        "mdelapenya/liferay-portal-nightlies:latest"
    );

    let empty = PortalImage::new(Portal::Ce, Some(String::new()));
    assert_eq!(empty.tag(), Portal::Ce.default_tag());

    let pinned = PortalImage::new(Portal::Ce, Some("7.1.3-ga4".to_string()));
    assert_eq!(pinned.fully_qualified_name(), "liferay/portal:7.1.3-ga4");
}

#[test]
fn debug_env_var_differs_only_for_release() {
    for portal in [Portal::Ce, Portal::Commerce, Portal::Dxp, Portal::Nightly] {
        assert_eq!(portal.debug_env_var(), "LIFERAY_JPDA_ENABLED");
    }
    assert_eq!(Portal::Release.debug_env_var(), "DEBUG_MODE");
}

#[test]
fn database_container_name_follows_the_owning_stack() {
    let database = DatabaseImage::mysql(Portal::Dxp, None);
    assert_eq!(database.container_name(), "db-dxp");
    assert_eq!(database.lpn_type(), "dxp");
    assert_eq!(database.type_name(), "mysql");
}

#[test]
fn database_defaults_and_environment_pair() {
    let database = DatabaseImage::mysql(Portal::Nightly, None);
    assert_eq!(database.fully_qualified_name(), "mdelapenya/mysql-utf8:5.7");
    assert_eq!(database.port(), 3301);
    assert_eq!(database.data_folder(), "/var/lib/mysql");

    let env = database.env_variables();
    assert!(env.contains(&format!("MYSQL_DATABASE={DB_NAME}")));
    assert!(env.contains(&format!("MYSQL_ROOT_PASSWORD={DB_PASSWORD}")));

    let pinned = DatabaseImage::mysql(Portal::Nightly, Some("8.0".to_string()));
    assert_eq!(pinned.tag(), "8.0");
}

#[test]
fn jdbc_url_addresses_the_link_alias_not_the_container() {
    let database = DatabaseImage::mysql(Portal::Ce, None);
    let jdbc = database.jdbc_connection();

    assert_eq!(jdbc.driver_class_name, "com.mysql.jdbc.Driver");
    assert_eq!(jdbc.user, "root");
    assert_eq!(jdbc.password, DB_PASSWORD);
    assert!(jdbc.url.starts_with(&format!("jdbc:mysql://{LINK_ALIAS}/{DB_NAME}")));
    assert!(!jdbc.url.contains(&database.container_name()));
}

//! Edit plans for the containerd CRI plugin configuration.
//!
//! All paths live under the CRI plugin table:
//!
//! ```toml
//! [plugins."io.containerd.grpc.v1.cri".containerd]
//! default_runtime_name = "nvidia"
//!
//! [plugins."io.containerd.grpc.v1.cri".containerd.runtimes.nvidia.options]
//! BinaryName = "/usr/bin/nvidia-container-runtime"
//!
//! [plugins."io.containerd.grpc.v1.cri".registry.configs."registry.example.com".auth]
//! username = "user"
//! ```

use crate::document::KeyPath;

use super::EditPlan;

/// Name of the CRI plugin table under `plugins`.
pub const CRI_PLUGIN: &str = "io.containerd.grpc.v1.cri";
/// Runtime handler registered for GPU workloads.
pub const NVIDIA_RUNTIME: &str = "nvidia";
/// containerd's stock runtime handler.
pub const RUNC_RUNTIME: &str = "runc";
/// Shim used by both runtimes.
pub const RUNC_V2_RUNTIME_TYPE: &str = "io.containerd.runc.v2";
/// OCI runtime binary invoked by the GPU runtime handler.
pub const NVIDIA_RUNTIME_BINARY: &str = "/usr/bin/nvidia-container-runtime";

/// `plugins."io.containerd.grpc.v1.cri"`
pub fn cri_plugin() -> KeyPath {
    KeyPath::new(["plugins", CRI_PLUGIN])
}

/// `plugins."io.containerd.grpc.v1.cri".containerd`
pub fn containerd_section() -> KeyPath {
    cri_plugin().child("containerd")
}

/// `...containerd.default_runtime_name`
pub fn default_runtime_name() -> KeyPath {
    containerd_section().child("default_runtime_name")
}

/// `...containerd.runtimes.<name>`
pub fn runtime(name: &str) -> KeyPath {
    containerd_section().join(["runtimes", name])
}

/// `...containerd.runtimes.runc.options.SystemdCgroup`
pub fn runc_systemd_cgroup() -> KeyPath {
    runtime(RUNC_RUNTIME).join(["options", "SystemdCgroup"])
}

/// `...registry.configs.<registry_url>`
pub fn registry_config(registry_url: &str) -> KeyPath {
    cri_plugin().join(["registry", "configs", registry_url])
}

/// Credentials and TLS settings for one registry host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrySettings {
    /// Registry host, including the port when it is not the default.
    pub registry_url: String,
    pub username: String,
    pub password: String,
    /// Path of the CA certificate used to verify the registry.
    pub ca_file: String,
    pub insecure_skip_verify: bool,
}

/// Makes `nvidia` the default runtime and registers its handler.
pub fn enable_nvidia_runtime() -> EditPlan {
    let nvidia = runtime(NVIDIA_RUNTIME);
    EditPlan::new()
        .set(default_runtime_name(), NVIDIA_RUNTIME)
        .set(runc_systemd_cgroup(), true)
        .set(nvidia.child("privileged_without_host_devices"), false)
        .set(nvidia.child("runtime_engine"), "")
        .set(nvidia.child("runtime_root"), "")
        .set(nvidia.child("runtime_type"), RUNC_V2_RUNTIME_TYPE)
        .set(nvidia.join(["options", "BinaryName"]), NVIDIA_RUNTIME_BINARY)
        .set(nvidia.join(["options", "SystemdCgroup"]), true)
}

/// Restores `runc` as the default runtime and removes the `nvidia` handler.
///
/// The baseline fields are rewritten before the handler's presence is
/// checked, so a tree without the handler still ends up with them changed
/// when the plan fails.
pub fn disable_nvidia_runtime() -> EditPlan {
    let nvidia = runtime(NVIDIA_RUNTIME);
    EditPlan::new()
        .set(default_runtime_name(), RUNC_RUNTIME)
        .set(runc_systemd_cgroup(), false)
        .require(nvidia.clone())
        .delete(nvidia)
}

/// Writes auth and TLS settings for `settings.registry_url`.
pub fn add_registry(settings: &RegistrySettings) -> EditPlan {
    let config = registry_config(&settings.registry_url);
    let auth = config.child("auth");
    let tls = config.child("tls");
    EditPlan::new()
        .set(auth.child("username"), settings.username.as_str())
        .set(auth.child("password"), settings.password.as_str())
        .set(auth.child("auth"), "")
        .set(auth.child("identitytoken"), "")
        .set(tls.child("ca_file"), settings.ca_file.as_str())
        .set(tls.child("insecure_skip_verify"), settings.insecure_skip_verify)
}

/// Removes every setting for `registry_url`; fails if none exist.
pub fn delete_registry(registry_url: &str) -> EditPlan {
    let config = registry_config(registry_url);
    EditPlan::new().require(config.clone()).delete(config)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use toml::Value;

    use super::*;
    use crate::document::{DocumentTree, LeafValue};
    use crate::plan::{EditStep, PlanError};

    const BASE_CONFIG: &str = r#"
version = 2

[plugins."io.containerd.grpc.v1.cri".containerd]
default_runtime_name = "runc"

[plugins."io.containerd.grpc.v1.cri".containerd.runtimes.runc]
runtime_type = "io.containerd.runc.v2"

[plugins."io.containerd.grpc.v1.cri".containerd.runtimes.runc.options]
SystemdCgroup = false
"#;

    fn base_tree() -> DocumentTree {
        DocumentTree::load(BASE_CONFIG).expect("base config parses")
    }

    fn settings(url: &str) -> RegistrySettings {
        RegistrySettings {
            registry_url: url.to_string(),
            username: "testuser".to_string(),
            password: "testpassword".to_string(),
            ca_file: "/etc/containerd/certs/ca.pem".to_string(),
            insecure_skip_verify: false,
        }
    }

    #[test]
    fn test_paths_are_rooted_at_cri_plugin() {
        assert_eq!(
            default_runtime_name().to_string(),
            r#"plugins."io.containerd.grpc.v1.cri".containerd.default_runtime_name"#
        );
        assert_eq!(
            registry_config("reg.example.com:5000").segments().last().map(String::as_str),
            Some("reg.example.com:5000")
        );
    }

    #[test]
    fn test_enable_plan_writes_eight_leaves() {
        let plan = enable_nvidia_runtime();
        assert_eq!(plan.assignments().count(), 8);
        assert_eq!(plan.len(), 8);
    }

    #[test]
    fn test_enable_plan_sets_nvidia_descriptor() {
        // Arrange
        let mut tree = base_tree();

        // Act
        enable_nvidia_runtime().apply(&mut tree).expect("enable applies");

        // Assert
        let nvidia = runtime(NVIDIA_RUNTIME);
        assert_eq!(
            tree.get_path(&default_runtime_name()),
            Some(&Value::String("nvidia".into()))
        );
        assert_eq!(tree.get_path(&runc_systemd_cgroup()), Some(&Value::Boolean(true)));
        assert_eq!(
            tree.get_path(&nvidia.child("runtime_type")),
            Some(&Value::String(RUNC_V2_RUNTIME_TYPE.into()))
        );
        assert_eq!(
            tree.get_path(&nvidia.join(["options", "BinaryName"])),
            Some(&Value::String(NVIDIA_RUNTIME_BINARY.into()))
        );
        assert_eq!(
            tree.get_path(&nvidia.child("privileged_without_host_devices")),
            Some(&Value::Boolean(false))
        );
        assert_eq!(
            tree.get_path(&nvidia.child("runtime_engine")),
            Some(&Value::String(String::new()))
        );
    }

    #[test]
    fn test_enable_then_disable_restores_baseline_and_removes_runtime() {
        // Arrange
        let mut tree = base_tree();
        enable_nvidia_runtime().apply(&mut tree).unwrap();

        // Act
        disable_nvidia_runtime().apply(&mut tree).expect("disable applies");

        // Assert
        assert_eq!(
            tree.get_path(&default_runtime_name()),
            Some(&Value::String("runc".into()))
        );
        assert_eq!(tree.get_path(&runc_systemd_cgroup()), Some(&Value::Boolean(false)));
        assert!(!tree.has_path(&runtime(NVIDIA_RUNTIME)));
        assert!(tree.has_path(&runtime(RUNC_RUNTIME)));
    }

    #[test]
    fn test_disable_without_runtime_fails_after_rewriting_baseline() {
        // Arrange: nvidia enabled by hand, but its handler table is absent.
        let mut tree = base_tree();
        tree.set_path(&default_runtime_name(), "nvidia").unwrap();
        tree.set_path(&runc_systemd_cgroup(), true).unwrap();

        // Act
        let err = disable_nvidia_runtime().apply(&mut tree).unwrap_err();

        // Assert
        assert!(matches!(err, PlanError::MissingPath { ref path } if *path == runtime(NVIDIA_RUNTIME)));
        assert_eq!(
            tree.get_path(&default_runtime_name()),
            Some(&Value::String("runc".into()))
        );
        assert_eq!(tree.get_path(&runc_systemd_cgroup()), Some(&Value::Boolean(false)));
    }

    #[test]
    fn test_disable_plan_requires_handler_before_deleting_it() {
        let plan = disable_nvidia_runtime();
        let nvidia = runtime(NVIDIA_RUNTIME);

        let steps = plan.steps();
        let paths: Vec<&KeyPath> = steps.iter().map(EditStep::path).collect();

        assert_eq!(
            paths,
            [&default_runtime_name(), &runc_systemd_cgroup(), &nvidia, &nvidia]
        );
        assert_eq!(steps[2], EditStep::RequirePresent { path: nvidia.clone() });
        assert_eq!(steps[3], EditStep::Delete { path: nvidia });
    }

    #[test]
    fn test_delete_registry_plan_targets_whole_registry_table() {
        let plan = delete_registry("demo.registry.example.com");

        assert!(plan
            .steps()
            .iter()
            .all(|step| *step.path() == registry_config("demo.registry.example.com")));
        assert_eq!(plan.assignments().count(), 0);
    }

    #[test]
    fn test_add_registry_reads_back_all_six_leaves() {
        // Arrange
        let s = settings("demo.registry.example.com");
        let mut tree = base_tree();

        // Act
        add_registry(&s).apply(&mut tree).expect("add applies");

        // Assert
        let config = registry_config(&s.registry_url);
        let expect = [
            (config.join(["auth", "username"]), LeafValue::from("testuser")),
            (config.join(["auth", "password"]), LeafValue::from("testpassword")),
            (config.join(["auth", "auth"]), LeafValue::from("")),
            (config.join(["auth", "identitytoken"]), LeafValue::from("")),
            (config.join(["tls", "ca_file"]), LeafValue::from("/etc/containerd/certs/ca.pem")),
            (config.join(["tls", "insecure_skip_verify"]), LeafValue::from(false)),
        ];
        for (path, leaf) in expect {
            let value = tree.get_path(&path).unwrap_or_else(|| panic!("{path} missing"));
            assert!(leaf.matches(value), "{path}: expected {leaf}, got {value}");
        }
    }

    #[test]
    fn test_add_registry_keeps_other_registries() {
        let mut tree = base_tree();
        add_registry(&settings("one.example.com")).apply(&mut tree).unwrap();

        add_registry(&settings("two.example.com")).apply(&mut tree).unwrap();

        assert!(tree.has_path(&registry_config("one.example.com")));
        assert!(tree.has_path(&registry_config("two.example.com")));
    }

    #[test]
    fn test_delete_registry_removes_only_that_registry() {
        let mut tree = base_tree();
        add_registry(&settings("one.example.com")).apply(&mut tree).unwrap();
        add_registry(&settings("two.example.com")).apply(&mut tree).unwrap();

        delete_registry("one.example.com").apply(&mut tree).expect("delete applies");

        assert!(!tree.has_path(&registry_config("one.example.com")));
        assert!(tree.has_path(&registry_config("two.example.com")));
    }

    #[test]
    fn test_delete_unknown_registry_fails_and_leaves_tree_unchanged() {
        let mut tree = base_tree();
        let before = tree.clone();

        let err = delete_registry("fake.registry.example.com")
            .apply(&mut tree)
            .unwrap_err();

        assert!(matches!(err, PlanError::MissingPath { .. }));
        assert_eq!(tree, before);
    }
}

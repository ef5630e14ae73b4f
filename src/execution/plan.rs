use serde::{Deserialize, Serialize};

use crate::command::CommandBuilder;
use crate::types::{BuildInfo, Invocation, ProvisionConfig};

/// Ordered invocations for one run: the version probe, then one per inventory
/// in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    invocations: Vec<Invocation>,
}

impl ExecutionPlan {
    pub fn build(builder: &CommandBuilder, build: &BuildInfo, config: &ProvisionConfig) -> Self {
        let invocations = std::iter::once(builder.version_probe())
            .chain(
                config
                    .inventories
                    .iter()
                    .map(|inventory| builder.invocation(build, config, inventory)),
            )
            .collect();

        Self { invocations }
    }

    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    pub fn len(&self) -> usize {
        self.invocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }

    pub fn inventory_count(&self) -> usize {
        self.invocations
            .iter()
            .filter(|i| i.inventory().is_some())
            .count()
    }
}

impl IntoIterator for ExecutionPlan {
    type Item = Invocation;
    type IntoIter = std::vec::IntoIter<Invocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.invocations.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::DEFAULT_ANSIBLE_BIN;
    use crate::types::InvocationKind;

    fn config(inventories: &[&str]) -> ProvisionConfig {
        ProvisionConfig {
            inventory_path: "inv".to_string(),
            inventories: inventories.iter().map(|s| s.to_string()).collect(),
            playbook_path: "site.yml".to_string(),
            ssh_private_key: "KEY".to_string(),
        }
    }

    #[test]
    fn test_probe_first_then_inventories_in_order() {
        let builder = CommandBuilder::new(DEFAULT_ANSIBLE_BIN, "/root/.ssh/id_rsa");
        let build = BuildInfo::new("/src", "abc123", "");

        let plan = ExecutionPlan::build(&builder, &build, &config(&["prod", "staging"]));

        assert_eq!(plan.len(), 3);
        assert_eq!(plan.inventory_count(), 2);
        let kinds: Vec<_> = plan.invocations().iter().map(|i| i.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                InvocationKind::VersionProbe,
                InvocationKind::Inventory {
                    name: "prod".to_string()
                },
                InvocationKind::Inventory {
                    name: "staging".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_no_inventories_still_probes() {
        let builder = CommandBuilder::new(DEFAULT_ANSIBLE_BIN, "/root/.ssh/id_rsa");
        let build = BuildInfo::new("/src", "abc123", "");

        let plan = ExecutionPlan::build(&builder, &build, &config(&[]));

        assert_eq!(plan.len(), 1);
        assert_eq!(plan.invocations()[0].args, vec!["--version"]);
    }

    #[test]
    fn test_plan_json_shape() {
        let builder = CommandBuilder::new("ansible-playbook", "/k");
        let build = BuildInfo::new("/src", "abc", "");

        let plan = ExecutionPlan::build(&builder, &build, &config(&["prod"]));
        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["invocations"][0]["kind"], "version_probe");
        assert_eq!(json["invocations"][1]["kind"], "inventory");
        assert_eq!(json["invocations"][1]["name"], "prod");
        assert_eq!(json["invocations"][1]["args"][2], "/src/inv/prod");
    }
}

//! Check-schema command handler

use super::resolve_scope;
use crate::cli::CheckSchemaArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{ComplianceRun, OutputWriter, SchemaCheck};
use sdcvalidator_core::check_schema_file;
use tracing::{instrument, warn};

/// Handle the check-schema command
#[instrument(skip(args, config, output), fields(schemas = args.schemas.len()))]
pub fn handle_check_schema(args: CheckSchemaArgs, config: &Config, output: &mut OutputWriter) -> Result<i32> {
    let scope = resolve_scope(args.all_namespaces, config);
    let mut checks = Vec::with_capacity(args.schemas.len());

    for schema in &args.schemas {
        let result = check_schema_file(schema, scope)?;
        if !result.is_compliant {
            warn!(
                schema = %schema.display(),
                violations = result.violations.len(),
                "Schema uses xsd:extension"
            );
        }
        checks.push(SchemaCheck {
            schema: schema.display().to_string(),
            result,
        });
    }

    let run = ComplianceRun::new(checks);
    output.compliance_run(&run)?;
    Ok(run.exit_code)
}

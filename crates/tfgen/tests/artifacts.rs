//! Backend, tfvars and variables files for an IAM role module

use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use tfgen::backend::BackendConfig;
use tfgen::generate::{create_backend_tf_file, create_tf_vars_json, create_variables_tf_file};
use tfgen::input::{parse_model, AppInterfaceInput};
use tfgen::schema::{FieldSpec, ObjectSchema, Schema, TypeRef};
use tfgen::terraform::Terraform;

#[derive(serde::Serialize, serde::Deserialize, Debug)]
struct Data {
    identifier: String,
    assume_role: IndexMap<String, serde_json::Value>,
    inline_policy: String,
    output_resource_name: String,
    region: String,
}

impl Schema for Data {
    fn schema() -> ObjectSchema {
        ObjectSchema::new()
            .field(FieldSpec::new("identifier", TypeRef::STRING))
            .field(FieldSpec::new("assume_role", TypeRef::map(TypeRef::Any)))
            .field(FieldSpec::new("inline_policy", TypeRef::STRING))
            .field(FieldSpec::new("output_resource_name", TypeRef::STRING))
            .field(FieldSpec::new("region", TypeRef::STRING))
    }
}

fn input() -> AppInterfaceInput<Data> {
    parse_model(serde_json::json!({
        "data": {
            "identifier": "test-external-resources-iam-role",
            "assume_role": {
                "aws": "null",
                "service": ["ec2.amazonaws.com"],
                "federated": "null",
            },
            "inline_policy": r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Action":["ec2:DescribeVpcs"],"Resource":["*"]}]}"#,
            "output_resource_name": "test-external-resources",
            "region": "us-east-1",
        },
        "provision": {
            "provision_provider": "aws",
            "provisioner": "ter-int-dev",
            "provider": "aws-iam-role",
            "identifier": "test-external-resources-iam-role",
            "target_cluster": "app-sre-stage-01",
            "target_namespace": "test-jpiriz",
            "target_secret_name": "test-external-resources",
            "module_provision_data": {
                "tf_state_bucket": "test-external-resources-state",
                "tf_state_region": "us-east-1",
                "tf_state_dynamodb_table": "test-external-resources-lock",
                "tf_state_key": "aws/ter-int-dev/aws-iam-role/test-external-resources-iam-role/terraform.state",
            },
        },
    }))
    .expect("valid input")
}

#[test]
fn tf_vars_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tfvars.json");

    create_tf_vars_json(&input().data, &path).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        r#"{"identifier":"test-external-resources-iam-role","assume_role":{"aws":"null","service":["ec2.amazonaws.com"],"federated":"null"},"inline_policy":"{\"Version\":\"2012-10-17\",\"Statement\":[{\"Effect\":\"Allow\",\"Action\":[\"ec2:DescribeVpcs\"],\"Resource\":[\"*\"]}]}","output_resource_name":"test-external-resources","region":"us-east-1"}"#
    );
}

#[test]
fn backend_tf_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backend.tf");

    let backend = BackendConfig::from(&input().provision.module_provision_data);
    create_backend_tf_file(&backend, &path).unwrap();

    let expected = r#"terraform {
  backend "s3" {
    bucket         = "test-external-resources-state"
    key            = "aws/ter-int-dev/aws-iam-role/test-external-resources-iam-role/terraform.state"
    region         = "us-east-1"
    dynamodb_table = "test-external-resources-lock"
    profile        = "external-resources-state"
  }
}
"#;
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, expected);

    let terraform = Terraform::default();
    if terraform.available() {
        assert_eq!(terraform.fmt(&written).unwrap(), expected);
    }
}

#[test]
fn variables_tf_file_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("variables.tf");

    create_variables_tf_file(&Data::schema(), &path, None).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("variable \"assume_role\" {\n  type = map(any)\n}\n"));

    let terraform = Terraform::default();
    if !terraform.available() {
        eprintln!("terraform not available, skipping validation");
        return;
    }
    terraform.validate(dir.path()).expect("terraform validate");
}

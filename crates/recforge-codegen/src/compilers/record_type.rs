//! Record type emission.
//!
//! Six artifacts per record type: the meta, type, and util headers, each
//! as a regenerated base and a write-once derived extension. The base type
//! header is the densest artifact: record class, range predicate, trait
//! specialization, and serializer all live there.

use recforge_spec::{Field, RecordType, Specification};
use tracing::info;

use super::{GeneratorConfig, RUNTIME_NS, push_section};
use crate::artifact::{Tier, write_artifact};
use crate::error::{CodegenError, Result};
use crate::naming::{to_camel_case, to_pascal_case, to_screaming};

pub struct RecordTypeCompiler<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> RecordTypeCompiler<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn compile(&self, spec: &Specification) -> Result<()> {
        for sequence in &spec.record_sequences {
            info!(sequence = %sequence.key, "compiling record sources");
            self.compile_record_type(&sequence.record_type)?;
        }

        Ok(())
    }

    fn compile_record_type(&self, record_type: &RecordType) -> Result<()> {
        let type_name = to_pascal_case(&record_type.key);

        write_artifact(
            &self.config.path(&format!("record/base/Base{type_name}Meta.h")),
            Tier::Base,
            &self.generate_base_meta(record_type),
        )?;
        write_artifact(
            &self.config.path(&format!("record/{type_name}Meta.h")),
            Tier::Derived,
            &self.generate_meta(record_type),
        )?;
        write_artifact(
            &self.config.path(&format!("record/base/Base{type_name}.h")),
            Tier::Base,
            &self.generate_base_type(record_type)?,
        )?;
        write_artifact(
            &self.config.path(&format!("record/{type_name}.h")),
            Tier::Derived,
            &self.generate_type(record_type),
        )?;
        write_artifact(
            &self.config.path(&format!("record/base/Base{type_name}Util.h")),
            Tier::Base,
            &self.generate_base_util(record_type),
        )?;
        write_artifact(
            &self.config.path(&format!("record/{type_name}Util.h")),
            Tier::Derived,
            &self.generate_util(record_type),
        )?;

        Ok(())
    }

    fn generate_base_meta(&self, record_type: &RecordType) -> String {
        let ns = &self.config.namespace;
        let type_name = to_pascal_case(&record_type.key);
        let guard = format!("BASE{}META_H_", to_screaming(&type_name));
        let enum_fields = record_type.enum_fields();

        let mut code = String::new();

        code.push_str(&format!("// auto-generated C++ file for `{}`\n", record_type.key));
        code.push('\n');
        code.push_str(&format!("#ifndef {guard}\n"));
        code.push_str(&format!("#define {guard}\n"));
        code.push('\n');
        code.push_str("#include \"record/Record.h\"\n");
        code.push('\n');
        code.push_str(&format!("using namespace {RUNTIME_NS};\n"));
        code.push('\n');
        code.push_str(&format!("namespace {ns} {{\n"));
        code.push('\n');
        code.push_str("// forward declarations\n");
        code.push_str(&format!("class {type_name};\n"));
        code.push('\n');
        code.push_str(&format!(
            "class Base{type_name}Meta : public RecordMeta<{type_name}>\n"
        ));
        code.push_str("{\n");
        code.push_str("public:\n");
        code.push('\n');

        if enum_fields.is_empty() {
            code.push_str(&format!(
                "    Base{type_name}Meta(const map<string, vector<string> >& enumSets)\n"
            ));
        } else {
            let initializers: Vec<String> = enum_fields
                .iter()
                .map(|field| {
                    format!(
                        "{}(enumSets.find(\"{}\")->second)",
                        field.name,
                        field.enum_set.as_deref().unwrap_or_default()
                    )
                })
                .collect();
            code.push_str(&format!(
                "    Base{type_name}Meta(const map<string, vector<string> >& enumSets) :\n"
            ));
            code.push_str(&format!("        {}\n", initializers.join(", ")));
        }
        code.push_str("    {\n");
        code.push_str("    }\n");
        code.push('\n');
        code.push_str("    // enum set references\n");
        for field in &enum_fields {
            code.push_str(&format!("    const vector<String>& {};\n", field.name));
        }
        code.push_str("};\n");
        code.push('\n');
        code.push_str(&format!("}} // namespace {ns}\n"));
        code.push('\n');
        code.push_str(&format!("#endif /* {guard} */\n"));

        code
    }

    fn generate_meta(&self, record_type: &RecordType) -> String {
        let ns = &self.config.namespace;
        let type_name = to_pascal_case(&record_type.key);
        let guard = format!("{}META_H_", to_screaming(&type_name));

        let mut code = String::new();

        code.push_str(&format!("// auto-generated C++ file for `{}`\n", record_type.key));
        code.push('\n');
        code.push_str(&format!("#ifndef {guard}\n"));
        code.push_str(&format!("#define {guard}\n"));
        code.push('\n');
        code.push_str(&format!("#include \"record/base/Base{type_name}Meta.h\"\n"));
        code.push('\n');
        code.push_str(&format!("using namespace {RUNTIME_NS};\n"));
        code.push('\n');
        code.push_str(&format!("namespace {ns} {{\n"));
        code.push('\n');
        code.push_str(&format!(
            "class {type_name}Meta : public Base{type_name}Meta\n"
        ));
        code.push_str("{\n");
        code.push_str("public:\n");
        code.push('\n');
        code.push_str(&format!(
            "    {type_name}Meta(const map<string, vector<string> >& enumSets) :\n"
        ));
        code.push_str(&format!("        Base{type_name}Meta(enumSets)\n"));
        code.push_str("    {\n");
        code.push_str("    }\n");
        code.push_str("};\n");
        code.push('\n');
        code.push_str(&format!("}} // namespace {ns}\n"));
        code.push('\n');
        code.push_str(&format!("#endif /* {guard} */\n"));

        code
    }

    fn generate_base_type(&self, record_type: &RecordType) -> Result<String> {
        let ns = &self.config.namespace;
        let type_name = to_pascal_case(&record_type.key);
        let guard = format!("BASE{}_H_", to_screaming(&type_name));

        let mut code = String::new();

        code.push_str(&format!("// auto-generated C++ file for `{}`\n", record_type.key));
        code.push('\n');
        code.push_str(&format!("#ifndef {guard}\n"));
        code.push_str(&format!("#define {guard}\n"));
        code.push('\n');
        code.push_str("#include \"record/Record.h\"\n");
        code.push_str(&format!("#include \"record/{type_name}Meta.h\"\n"));
        for reference_type in record_type.reference_type_keys() {
            code.push_str(&format!(
                "#include \"record/{}.h\"\n",
                to_pascal_case(&reference_type)
            ));
        }
        code.push('\n');
        code.push_str(&format!("using namespace {RUNTIME_NS};\n"));
        code.push('\n');
        code.push_str(&format!("namespace {ns} {{\n"));
        code.push('\n');
        push_section(&mut code, "forward declarations");
        code.push('\n');
        code.push_str(&format!("class {type_name};\n"));
        code.push_str(&format!("class {type_name}Config;\n"));
        code.push_str(&format!("class {type_name}Generator;\n"));
        code.push_str(&format!("class {type_name}HydratorChain;\n"));
        code.push_str(&format!("class {type_name}RangePredicate;\n"));
        code.push('\n');
        push_section(&mut code, "base record type");
        code.push('\n');

        self.push_record_class(&mut code, record_type, &type_name);
        self.push_record_inline_definitions(&mut code, record_type, &type_name);

        push_section(&mut code, "base range predicate type");
        code.push('\n');
        self.push_range_predicate(&mut code, record_type, &type_name);

        code.push_str(&format!("}} // namespace {ns}\n"));
        code.push('\n');
        code.push_str(&format!("namespace {RUNTIME_NS} {{\n"));
        code.push('\n');
        push_section(&mut code, "record traits specialization");
        code.push('\n');
        self.push_record_traits(&mut code, record_type, &type_name);

        push_section(&mut code, "serialize method specialization");
        code.push('\n');
        self.push_serializer(&mut code, record_type, &type_name)?;

        code.push_str(&format!("}} // namespace {RUNTIME_NS}\n"));
        code.push('\n');
        code.push_str(&format!("#endif /* {guard} */\n"));

        Ok(code)
    }

    fn push_record_class(&self, code: &mut String, record_type: &RecordType, type_name: &str) {
        code.push_str(&format!("class Base{type_name}: public Record\n"));
        code.push_str("{\n");
        code.push_str("public:\n");
        code.push('\n');
        code.push_str(&format!("    Base{type_name}(const {type_name}Meta& meta) :\n"));
        code.push_str("        _meta(meta)\n");
        code.push_str("    {\n");
        code.push_str("    }\n");
        code.push('\n');

        for field in &record_type.fields {
            let accessor = to_camel_case(&field.name);
            let cpp_type = field.value_type.cpp_name();

            code.push_str(&format!("    void {accessor}(const {cpp_type}& v);\n"));
            code.push_str(&format!("    const {cpp_type}& {accessor}() const;\n"));
            if field.is_enum() {
                code.push_str(&format!("    const String& {accessor}EnumValue() const;\n"));
            }
            code.push('\n');

            if field.value_type.is_vector() {
                let element = field.value_type.element_type().cpp_name();
                code.push_str(&format!(
                    "    void {accessor}SetOne(const {element}& v, \
                     const size_t i = numeric_limits<size_t>::max());\n"
                ));
                code.push_str(&format!(
                    "    const {element}& {accessor}GetOne(const size_t i) const;\n"
                ));
                code.push('\n');
            }
        }

        for reference in &record_type.references {
            let accessor = to_camel_case(&reference.name);
            let target = to_pascal_case(&reference.record_type_key);

            code.push_str(&format!("    void {accessor}(const AutoPtr<{target}>& v);\n"));
            code.push_str(&format!("    const AutoPtr<{target}>& {accessor}() const;\n"));
            code.push('\n');
        }

        code.push_str("protected:\n");
        code.push('\n');
        code.push_str("    // meta\n");
        code.push_str(&format!("    const {type_name}Meta& _meta;\n"));

        if !record_type.fields.is_empty() {
            code.push('\n');
            code.push_str("    // fields\n");
        }
        for field in &record_type.fields {
            code.push_str(&format!(
                "    {} _{};\n",
                field.value_type.cpp_name(),
                field.name
            ));
        }

        if !record_type.references.is_empty() {
            code.push('\n');
            code.push_str("    // references\n");
        }
        for reference in &record_type.references {
            code.push_str(&format!(
                "    AutoPtr<{}> _{};\n",
                to_pascal_case(&reference.record_type_key),
                reference.name
            ));
        }

        code.push_str("};\n");
        code.push('\n');
    }

    fn push_record_inline_definitions(
        &self,
        code: &mut String,
        record_type: &RecordType,
        type_name: &str,
    ) {
        for field in &record_type.fields {
            let accessor = to_camel_case(&field.name);
            let cpp_type = field.value_type.cpp_name();
            let member = &field.name;

            code.push_str(&format!(
                "inline void Base{type_name}::{accessor}(const {cpp_type}& v)\n"
            ));
            code.push_str("{\n");
            code.push_str(&format!("    _{member} = v;\n"));
            code.push_str("}\n");
            code.push('\n');
            code.push_str(&format!(
                "inline const {cpp_type}& Base{type_name}::{accessor}() const\n"
            ));
            code.push_str("{\n");
            code.push_str(&format!("    return _{member};\n"));
            code.push_str("}\n");
            code.push('\n');

            if field.is_enum() {
                code.push_str(&format!(
                    "inline const String& Base{type_name}::{accessor}EnumValue() const\n"
                ));
                code.push_str("{\n");
                code.push_str(&format!("    return _meta.{member}[_{member}];\n"));
                code.push_str("}\n");
                code.push('\n');
            }

            if field.value_type.is_vector() {
                let element = field.value_type.element_type().cpp_name();

                code.push_str(&format!(
                    "inline void Base{type_name}::{accessor}SetOne(const {element}& v, \
                     const size_t i)\n"
                ));
                code.push_str("{\n");
                code.push_str("    if (i == numeric_limits<size_t>::max())\n");
                code.push_str("    {\n");
                code.push_str(&format!("        _{member}.push_back(v);\n"));
                code.push_str("    }\n");
                code.push_str("    else\n");
                code.push_str("    {\n");
                code.push_str(&format!("        _{member}[i] = v;\n"));
                code.push_str("    }\n");
                code.push_str("}\n");
                code.push('\n');
                code.push_str(&format!(
                    "inline const {element}& Base{type_name}::{accessor}GetOne(\
                     const size_t i) const\n"
                ));
                code.push_str("{\n");
                code.push_str(&format!("    return _{member}[i];\n"));
                code.push_str("}\n");
                code.push('\n');
            }
        }

        for reference in &record_type.references {
            let accessor = to_camel_case(&reference.name);
            let target = to_pascal_case(&reference.record_type_key);
            let member = &reference.name;

            code.push_str(&format!(
                "inline void Base{type_name}::{accessor}(const AutoPtr<{target}>& v)\n"
            ));
            code.push_str("{\n");
            code.push_str(&format!("    _{member} = v;\n"));
            code.push_str("}\n");
            code.push('\n');
            code.push_str(&format!(
                "inline const AutoPtr<{target}>& Base{type_name}::{accessor}() const\n"
            ));
            code.push_str("{\n");
            code.push_str(&format!("    return _{member};\n"));
            code.push_str("}\n");
            code.push('\n');
        }
    }

    fn push_range_predicate(&self, code: &mut String, record_type: &RecordType, type_name: &str) {
        let numeric_fields: Vec<&Field> = record_type
            .fields
            .iter()
            .filter(|f| f.value_type.is_numeric())
            .collect();

        code.push_str(&format!(
            "class Base{type_name}RangePredicate: public RecordRangePredicate<{type_name}>\n"
        ));
        code.push_str("{\n");
        code.push_str("public:\n");
        code.push('\n');
        code.push_str(&format!("    Base{type_name}RangePredicate()\n"));
        code.push_str("    {\n");
        code.push_str("    }\n");
        code.push('\n');

        for field in &numeric_fields {
            let accessor = to_camel_case(&field.name);
            let cpp_type = field.value_type.cpp_name();

            code.push_str(&format!("    void {accessor}({cpp_type} min, {cpp_type} max);\n"));
            code.push_str(&format!("    void {accessor}({cpp_type} v);\n"));
            code.push_str(&format!("    const Interval<{cpp_type}>& {accessor}() const;\n"));
            code.push('\n');
        }

        code.push_str("protected:\n");
        code.push('\n');
        code.push_str("    // fields\n");
        for field in &numeric_fields {
            code.push_str(&format!(
                "    Interval<{}> _{}_range;\n",
                field.value_type.cpp_name(),
                field.name
            ));
        }
        code.push_str("};\n");
        code.push('\n');

        for field in &numeric_fields {
            let accessor = to_camel_case(&field.name);
            let cpp_type = field.value_type.cpp_name();
            let member = &field.name;

            code.push_str(&format!(
                "inline void Base{type_name}RangePredicate::{accessor}\
                 ({cpp_type} min, {cpp_type} max)\n"
            ));
            code.push_str("{\n");
            code.push_str(&format!("    _{member}_range.set(min, max);\n"));
            code.push_str("}\n");
            code.push('\n');
            code.push_str(&format!(
                "inline void Base{type_name}RangePredicate::{accessor}({cpp_type} v)\n"
            ));
            code.push_str("{\n");
            code.push_str(&format!("    _{member}_range.set(v++, v);\n"));
            code.push_str("}\n");
            code.push('\n');
            code.push_str(&format!(
                "inline const Interval<{cpp_type}>& \
                 Base{type_name}RangePredicate::{accessor}() const\n"
            ));
            code.push_str("{\n");
            code.push_str(&format!("    return _{member}_range;\n"));
            code.push_str("}\n");
            code.push('\n');
        }
    }

    fn push_record_traits(&self, code: &mut String, record_type: &RecordType, type_name: &str) {
        let ns = &self.config.namespace;

        let mut field_constants: Vec<String> = record_type
            .fields_ordered()
            .iter()
            .map(|f| to_screaming(&f.name))
            .collect();
        field_constants.extend(
            record_type
                .references_ordered()
                .iter()
                .map(|r| to_screaming(&r.name)),
        );

        code.push_str("template<>\n");
        code.push_str(&format!("struct RecordTraits<{ns}::{type_name}>\n"));
        code.push_str("{\n");
        code.push_str(&format!("    typedef {ns}::{type_name}Meta MetaType;\n"));
        code.push_str(&format!("    typedef {ns}::{type_name}Generator GeneratorType;\n"));
        code.push_str(&format!(
            "    typedef {ns}::{type_name}HydratorChain HydratorChainType;\n"
        ));
        code.push_str(&format!("    typedef RecordFactory<{ns}::{type_name}> FactoryType;\n"));
        code.push_str(&format!(
            "    typedef {ns}::{type_name}RangePredicate RangePredicateType;\n"
        ));
        code.push('\n');
        code.push_str(&format!(
            "    enum Field {{ UNKNOWN, GEN_ID, {} }};\n",
            field_constants.join(", ")
        ));
        code.push_str("};\n");
        code.push('\n');
    }

    fn push_serializer(
        &self,
        code: &mut String,
        record_type: &RecordType,
        type_name: &str,
    ) -> Result<()> {
        let ns = &self.config.namespace;

        code.push_str("template<>\n");
        code.push_str(&format!(
            "inline void OutputCollector<{ns}::Base{type_name}>::CollectorType::serialize(\
             OutputCollector<{ns}::{type_name}>::CollectorType::StreamType& out, \
             const {ns}::Base{type_name}& record)\n"
        ));
        code.push_str("{\n");

        for field in record_type.fields_ordered() {
            if field.value_type.is_vector() {
                return Err(CodegenError::UnsupportedVectorField {
                    record: record_type.key.clone(),
                    field: field.name.clone(),
                });
            }

            let accessor = to_camel_case(&field.name);
            if field.is_enum() {
                code.push_str(&format!("    write(out, record.{accessor}EnumValue(), false);\n"));
            } else {
                code.push_str(&format!("    write(out, record.{accessor}(), false);\n"));
            }
            code.push_str("    out << '|';\n");
        }

        code.push_str("    out << '\\n';\n");
        code.push_str("}\n");
        code.push('\n');

        Ok(())
    }

    fn generate_type(&self, record_type: &RecordType) -> String {
        let ns = &self.config.namespace;
        let type_name = to_pascal_case(&record_type.key);
        let guard = format!("{}_H_", to_screaming(&type_name));

        let mut code = String::new();

        code.push_str(&format!("#ifndef {guard}\n"));
        code.push_str(&format!("#define {guard}\n"));
        code.push('\n');
        code.push_str(&format!("#include \"record/base/Base{type_name}.h\"\n"));
        code.push('\n');
        code.push_str(&format!("using namespace {RUNTIME_NS};\n"));
        code.push('\n');
        code.push_str(&format!("namespace {ns} {{\n"));
        code.push('\n');
        push_section(&mut code, "record type");
        code.push('\n');
        code.push_str(&format!("class {type_name}: public Base{type_name}\n"));
        code.push_str("{\n");
        code.push_str("public:\n");
        code.push('\n');
        code.push_str(&format!("    {type_name}(const {type_name}Meta& meta) :\n"));
        code.push_str(&format!("        Base{type_name}(meta)\n"));
        code.push_str("    {\n");
        code.push_str("    }\n");
        code.push_str("};\n");
        code.push('\n');
        push_section(&mut code, "range predicate type");
        code.push('\n');
        code.push_str(&format!(
            "class {type_name}RangePredicate: public Base{type_name}RangePredicate\n"
        ));
        code.push_str("{\n");
        code.push_str("public:\n");
        code.push('\n');
        code.push_str(&format!("    {type_name}RangePredicate()\n"));
        code.push_str("    {\n");
        code.push_str("    }\n");
        code.push_str("};\n");
        code.push('\n');
        code.push_str(&format!("}} // namespace {ns}\n"));
        code.push('\n');
        code.push_str(&format!("namespace {RUNTIME_NS} {{\n"));
        code.push('\n');
        push_section(&mut code, "record serialize method specialization");
        code.push('\n');
        code.push_str("template<>\n");
        code.push_str(&format!(
            "inline void OutputCollector<{ns}::{type_name}>::CollectorType::serialize(\
             OutputCollector<{ns}::{type_name}>::CollectorType::StreamType& out, \
             const {ns}::{type_name}& record)\n"
        ));
        code.push_str("{\n");
        code.push_str(&format!(
            "    OutputCollector<{ns}::Base{type_name}>::CollectorType::serialize(out, record);\n"
        ));
        code.push_str("}\n");
        code.push('\n');
        code.push_str(&format!("}} // namespace {RUNTIME_NS}\n"));
        code.push('\n');
        code.push_str(&format!("#endif /* {guard} */\n"));

        code
    }

    fn generate_base_util(&self, record_type: &RecordType) -> String {
        let ns = &self.config.namespace;
        let type_name = to_pascal_case(&record_type.key);
        let guard = format!("BASE{}UTIL_H_", to_screaming(&type_name));

        let mut code = String::new();

        code.push_str(&format!("// auto-generated C++ file for `{}`\n", record_type.key));
        code.push('\n');
        code.push_str(&format!("#ifndef {guard}\n"));
        code.push_str(&format!("#define {guard}\n"));
        code.push('\n');
        code.push_str(&format!("#include \"record/{type_name}.h\"\n"));
        code.push('\n');
        code.push_str(&format!("namespace {RUNTIME_NS} {{\n"));
        code.push('\n');
        push_section(&mut code, "record field inspection structures");

        for field in record_type.fields_ordered() {
            self.push_field_traits(
                &mut code,
                &type_name,
                &field.name,
                &field.value_type.cpp_name(),
                field.value_type.is_numeric(),
                false,
            );
        }

        for reference in record_type.references_ordered() {
            let target = format!("{ns}::{}", to_pascal_case(&reference.record_type_key));
            self.push_field_traits(&mut code, &type_name, &reference.name, &target, false, true);
        }

        code.push('\n');
        code.push_str(&format!("}} // namespace {RUNTIME_NS}\n"));
        code.push('\n');
        code.push_str(&format!("#endif /* {guard} */\n"));

        code
    }

    /// One `RecordFieldTraits` specialization. References wrap the field
    /// type in `AutoPtr`; non-numeric fields and references get throwing
    /// range accessors.
    fn push_field_traits(
        &self,
        code: &mut String,
        type_name: &str,
        field_name: &str,
        field_type: &str,
        numeric: bool,
        is_reference: bool,
    ) {
        let ns = &self.config.namespace;
        let constant = to_screaming(field_name);
        let accessor = to_camel_case(field_name);
        let method_field_type = if is_reference {
            "AutoPtr<FieldType> "
        } else {
            "FieldType"
        };

        code.push('\n');
        code.push_str(&format!("// {field_name}\n"));
        code.push_str("template<>\n");
        code.push_str(&format!(
            "struct RecordFieldTraits<RecordTraits<{ns}::{type_name}>::{constant}, \
             {ns}::{type_name}>\n"
        ));
        code.push_str("{\n");
        code.push_str(&format!("    typedef {field_type} FieldType;\n"));
        code.push_str("    // record field getter / setter types\n");
        code.push_str(&format!(
            "    typedef typename MethodTraits<{ns}::{type_name}, \
             {method_field_type}>::Setter FieldSetterType;\n"
        ));
        code.push_str(&format!(
            "    typedef typename MethodTraits<{ns}::{type_name}, \
             {method_field_type}>::Getter FieldGetterType;\n"
        ));
        code.push_str("    // range predicate getter / setter types\n");
        code.push_str(&format!(
            "    typedef typename RecordTraits<{ns}::{type_name}>::RangePredicateType \
             RecordRangePredicateType;\n"
        ));
        code.push_str(&format!(
            "    typedef typename MethodTraits<RecordRangePredicateType, \
             {method_field_type}>::RangeSetterShort RangeSetterShortType;\n"
        ));
        code.push_str(&format!(
            "    typedef typename MethodTraits<RecordRangePredicateType, \
             {method_field_type}>::RangeSetterLong RangeSetterLongType;\n"
        ));
        code.push_str(&format!(
            "    typedef typename MethodTraits<RecordRangePredicateType, \
             {method_field_type}>::RangeGetter RangeGetterType;\n"
        ));
        code.push('\n');
        code.push_str("    static inline FieldSetterType setter()\n");
        code.push_str("    {\n");
        code.push_str(&format!(
            "        return static_cast<FieldSetterType>(&{ns}::{type_name}::{accessor});\n"
        ));
        code.push_str("    }\n");
        code.push('\n');
        code.push_str("    static inline FieldGetterType getter()\n");
        code.push_str("    {\n");
        code.push_str(&format!(
            "        return static_cast<FieldGetterType>(&{ns}::{type_name}::{accessor});\n"
        ));
        code.push_str("    }\n");

        if numeric {
            for (method, cast) in [
                ("rangeSetterShort", "RangeSetterShortType"),
                ("rangeSetterLong", "RangeSetterLongType"),
                ("rangeGetter", "RangeGetterType"),
            ] {
                code.push('\n');
                code.push_str(&format!("    static inline {cast} {method}()\n"));
                code.push_str("    {\n");
                code.push_str(&format!(
                    "        return static_cast<{cast}>(&RecordRangePredicateType::{accessor});\n"
                ));
                code.push_str("    }\n");
            }
        } else {
            for (method, kind) in [
                ("rangeSetterShort", "setter"),
                ("rangeSetterLong", "setter"),
                ("rangeGetter", "getter"),
            ] {
                let return_type = match method {
                    "rangeSetterShort" => "RangeSetterShortType",
                    "rangeSetterLong" => "RangeSetterLongType",
                    _ => "RangeGetterType",
                };
                code.push('\n');
                code.push_str(&format!("    static inline {return_type} {method}()\n"));
                code.push_str("    {\n");
                code.push_str(&format!(
                    "        throw RuntimeException(\"Trying to access record range predicate \
                     {kind} for non-numeric field `{field_name}`\");\n"
                ));
                code.push_str("    }\n");
            }
        }
        code.push_str("};\n");
    }

    fn generate_util(&self, record_type: &RecordType) -> String {
        let type_name = to_pascal_case(&record_type.key);
        let guard = format!("{}UTIL_H_", to_screaming(&type_name));

        let mut code = String::new();

        code.push_str(&format!("#ifndef {guard}\n"));
        code.push_str(&format!("#define {guard}\n"));
        code.push('\n');
        code.push_str(&format!("#include \"record/base/Base{type_name}Util.h\"\n"));
        code.push('\n');
        code.push_str(&format!("namespace {RUNTIME_NS} {{\n"));
        code.push('\n');
        code.push_str("// put your extra RecordFieldTraits specializations here\n");
        code.push('\n');
        code.push_str(&format!("}} // namespace {RUNTIME_NS}\n"));
        code.push('\n');
        code.push_str(&format!("#endif /* {guard} */\n"));

        code
    }
}

//! Shared fixtures for descriptor tests.

#![allow(dead_code)]

use cadence_descriptor::{ClassBinding, TypeCatalog};
use cadence_model::{ComponentKind, PortDescriptor};
use std::sync::Once;

/// Routes `tracing` output to the test harness. Set `RUST_LOG` to see it.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// An atomic component with both port shapes' settings, dependencies,
/// semantic types and parameters.
pub const RAMP: &str = r#"<?xml version="1.0"?>
<!DOCTYPE entity PUBLIC "-//UC Berkeley//DTD MoML 1//EN"
    "http://ptolemy.eecs.berkeley.edu/xml/dtd/MoML_1.dtd">
<entity name="Ramp" class="ptolemy.kernel.ComponentEntity">
  <property name="entityId" value="urn:lsid:kepler-project.org:actor:7:1" class="org.kepler.moml.NamedObjId"/>
  <property name="class" value="ptolemy.actor.lib.Ramp" class="ptolemy.kernel.util.StringAttribute">
    <property name="id" value="urn:lsid:kepler-project.org:class:7:1" class="ptolemy.kernel.util.StringAttribute"/>
  </property>
  <property name="dependency0" value="ptolemy-lib.jar" class="org.kepler.moml.Dependency"/>
  <property name="semanticType00" value="urn:lsid:localhost:onto:1:1#Constant" class="org.kepler.sms.SemanticType"/>
  <property name="semanticType11" value="urn:lsid:localhost:onto:1:1#Source" class="org.kepler.sms.SemanticType"/>
  <!-- parameters -->
  <property name="init" value="0" class="ptolemy.data.expr.Parameter"/>
  <property name="step" value="1" class="ptolemy.data.expr.Parameter"/>
  <doc>Produces an arithmetic sequence &amp; nothing else.</doc>
  <property name="output" class="org.kepler.moml.PortAttribute">
    <property name="direction" value="output" class="ptolemy.kernel.util.StringAttribute"/>
    <property name="dataType" value="scalar" class="ptolemy.kernel.util.StringAttribute"/>
    <property name="isMultiport" value="false" class="ptolemy.kernel.util.StringAttribute"/>
  </property>
  <property name="trigger" class="org.kepler.moml.PortAttribute">
    <property name="direction" value="input" class="ptolemy.kernel.util.StringAttribute"/>
    <property name="dataType" value="general" class="ptolemy.kernel.util.StringAttribute"/>
    <property name="isMultiport" value="TRUE" class="ptolemy.kernel.util.StringAttribute"/>
    <property name="_showName" class="ptolemy.kernel.util.SingletonAttribute"/>
  </property>
</entity>
"#;

/// A composite class definition with a director, a nested entity and wiring.
pub const PIPELINE_CLASS: &str = r#"<?xml version="1.0"?>
<class name="Pipeline" class="ptolemy.actor.TypedCompositeActor">
  <property name="entityId" value="urn:lsid:localhost:actor:40:2" class="org.kepler.moml.NamedObjId"/>
  <property name="class" value="org.example.Pipeline" class="ptolemy.kernel.util.StringAttribute">
    <property name="id" value="urn:lsid:localhost:class:40:1" class="ptolemy.kernel.util.StringAttribute"/>
  </property>
  <property name="SDF Director" class="ptolemy.domains.sdf.kernel.SDFDirector">
    <property name="iterations" value="4" class="ptolemy.data.expr.Parameter"/>
  </property>
  <port name="in" class="ptolemy.actor.TypedIOPort">
    <property name="direction" value="input"/>
    <property name="dataType" value="int"/>
    <property name="isMultiport" value="false"/>
  </port>
  <relation name="r1" class="ptolemy.actor.TypedIORelation"/>
  <entity name="Stage" class="ptolemy.kernel.ComponentEntity">
    <property name="entityId" value="urn:lsid:localhost:actor:41:1" class="org.kepler.moml.NamedObjId"/>
  </entity>
  <link port="in" relation="r1"/>
  <link port="Stage.input" relation="r1"/>
</class>
"#;

/// Catalog that knows the classes used by the fixtures.
pub fn catalog() -> TypeCatalog {
    TypeCatalog::new()
        .with_binding(
            ClassBinding::new("ptolemy.actor.lib.Ramp")
                .with_kind(ComponentKind::Atomic)
                .with_port(PortDescriptor::output("output", "scalar"))
                .with_port(PortDescriptor::input("trigger", "general").multiport()),
        )
        .with_binding(ClassBinding::new("ptolemy.domains.sdf.kernel.SDFDirector"))
        .with_binding(ClassBinding::new("ptolemy.kernel.util.StringAttribute"))
}

//! `ExampleLibrary`, the bundled component inspected when no path is given.

use super::{
    CallFrame, Instance, NativeComponent, NativeComponentBuilder, RuntimeError, TypeBuilder,
    system,
};
use crate::model::{
    Dispatch, MemberDescriptor, Parameter, STRING_TYPE, TypeRef, VOID_TYPE, Value, Visibility,
};

pub const NAMESPACE: &str = "ExampleLibrary";

const STATUS_TYPE: &str = "ExampleLibrary.DeviceStatus";
const DEVICE_INTERFACE: &str = "ExampleLibrary.IDevice";
const STATUS_NAMES: [&str; 4] = ["Off", "On", "Standby", "Error"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeviceStatus {
    Off,
    On,
    Standby,
    Error,
}

impl DeviceStatus {
    fn from_code(code: i64) -> Result<Self, RuntimeError> {
        match code {
            0 => Ok(Self::Off),
            1 => Ok(Self::On),
            2 => Ok(Self::Standby),
            3 => Ok(Self::Error),
            other => Err(RuntimeError::Raised(format!(
                "{} is not a defined DeviceStatus value",
                other
            ))),
        }
    }

    fn name(self) -> &'static str {
        STATUS_NAMES[self as usize]
    }
}

#[derive(Debug)]
struct Device {
    name: String,
    status: DeviceStatus,
}

fn new_device() -> Instance {
    Box::new(Device {
        name: "MyDevice".to_string(),
        status: DeviceStatus::Off,
    })
}

fn get_name(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    Ok(Value::from(frame.this_mut::<Device>()?.name.clone()))
}

fn set_name(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    let name = frame.arg(0)?.to_string();
    frame.this_mut::<Device>()?.name = name;
    Ok(Value::Null)
}

fn get_is_active(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    Ok(Value::Bool(frame.this_mut::<Device>()?.status == DeviceStatus::On))
}

fn get_status_code(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    Ok(Value::Int(frame.this_mut::<Device>()?.status as i64))
}

fn print_status(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    let device = frame.this_mut::<Device>()?;
    let line = format!(
        "Device '{}' is currently: {}",
        device.name,
        device.status.name()
    );
    frame.write_line(&line);
    Ok(Value::Null)
}

fn set_status(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    let code = frame.arg_i64(0)?;
    let status = DeviceStatus::from_code(code)?;
    let device = frame.this_mut::<Device>()?;
    let old = std::mem::replace(&mut device.status, status);
    let line = format!("Status changed from {} to {}", old.name(), status.name());
    frame.write_line(&line);
    Ok(Value::from(format!("Status updated to {}", code)))
}

fn turn_on(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    frame.this_mut::<Device>()?.status = DeviceStatus::On;
    Ok(Value::Null)
}

fn turn_off(frame: &mut CallFrame<'_>) -> Result<Value, RuntimeError> {
    frame.this_mut::<Device>()?.status = DeviceStatus::Off;
    Ok(Value::Null)
}

fn t(name: &str) -> TypeRef {
    TypeRef::new(name)
}

fn void_method(name: &str) -> MemberDescriptor {
    MemberDescriptor::method(name, vec![], t(VOID_TYPE))
}

pub fn component() -> NativeComponent {
    let status = TypeBuilder::enumeration(NAMESPACE, "DeviceStatus")
        .visibility(Visibility::Internal)
        .enum_values(&STATUS_NAMES);

    let idevice = TypeBuilder::interface(NAMESPACE, "IDevice")
        .member(
            MemberDescriptor::property("IsActive", t("System.Boolean"), true, false)
                .with_dispatch(Dispatch::Abstract),
        )
        .member(
            MemberDescriptor::method("get_IsActive", vec![], t("System.Boolean"))
                .with_dispatch(Dispatch::Abstract),
        )
        .member(void_method("TurnOn").with_dispatch(Dispatch::Abstract))
        .member(void_method("TurnOff").with_dispatch(Dispatch::Abstract));

    let device = TypeBuilder::class(NAMESPACE, "Device")
        .implements(t(DEVICE_INTERFACE))
        .member(
            MemberDescriptor::field("_status", t(STATUS_TYPE))
                .with_visibility(Visibility::Private),
        )
        .member(
            MemberDescriptor::field("<Name>k__BackingField", t(STRING_TYPE))
                .with_visibility(Visibility::Private),
        )
        .member(MemberDescriptor::property("Name", t(STRING_TYPE), true, true))
        .member(
            MemberDescriptor::property("IsActive", t("System.Boolean"), true, false)
                .with_dispatch(Dispatch::Final),
        )
        .constructor(new_device)
        .method(MemberDescriptor::method("get_Name", vec![], t(STRING_TYPE)), get_name)
        .method(
            MemberDescriptor::method(
                "set_Name",
                vec![Parameter::new("value", t(STRING_TYPE))],
                t(VOID_TYPE),
            ),
            set_name,
        )
        .method(
            MemberDescriptor::method("get_IsActive", vec![], t("System.Boolean"))
                .with_dispatch(Dispatch::Final),
            get_is_active,
        )
        .method(
            MemberDescriptor::method("GetStatusCode", vec![], t("System.Int32")),
            get_status_code,
        )
        .method(void_method("PrintStatus"), print_status)
        .method(
            MemberDescriptor::method(
                "SetStatus",
                vec![Parameter::new("value", t("System.Int32"))],
                t(STRING_TYPE),
            ),
            set_status,
        )
        .method(void_method("TurnOn").with_dispatch(Dispatch::Final), turn_on)
        .method(void_method("TurnOff").with_dispatch(Dispatch::Final), turn_off);
    let device = system::object_members()
        .into_iter()
        .fold(device, |ty, m| ty.member(m));

    let status_changed = TypeBuilder::delegate(NAMESPACE, "StatusChanged").member(
        MemberDescriptor::method(
            "Invoke",
            vec![
                Parameter::new("oldStatus", t(STATUS_TYPE)),
                Parameter::new("newStatus", t(STATUS_TYPE)),
            ],
            t(VOID_TYPE),
        )
        .with_dispatch(Dispatch::Virtual),
    );

    NativeComponentBuilder::new(NAMESPACE)
        .ty(status)
        .ty(idevice)
        .ty(device)
        .ty(status_changed)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ComponentRuntime, MetadataProvider};

    #[test]
    fn test_device_state_survives_calls() {
        let component = component();
        let types = component.types().unwrap();
        let device = types.iter().find(|t| t.name == "Device").unwrap();
        let mut instance = component.construct(device).unwrap();
        let mut console = String::new();

        let set_status = device.methods_named("SetStatus").next().unwrap();
        let args = [Value::Int(2)];
        let mut frame = CallFrame {
            type_name: &device.full_name,
            this: Some(instance.as_mut()),
            args: &args,
            console: &mut console,
        };
        let result = component.call(device, set_status, &mut frame).unwrap();
        assert_eq!(result, Value::from("Status updated to 2"));
        assert_eq!(console, "Status changed from Off to Standby\n");

        let code = device.methods_named("GetStatusCode").next().unwrap();
        let mut console = String::new();
        let mut frame = CallFrame {
            type_name: &device.full_name,
            this: Some(instance.as_mut()),
            args: &[],
            console: &mut console,
        };
        assert_eq!(component.call(device, code, &mut frame).unwrap(), Value::Int(2));
    }

    #[test]
    fn test_set_status_rejects_undefined_code() {
        let component = component();
        let types = component.types().unwrap();
        let device = types.iter().find(|t| t.name == "Device").unwrap();
        let mut instance = component.construct(device).unwrap();
        let mut console = String::new();
        let args = [Value::Int(9)];
        let mut frame = CallFrame {
            type_name: &device.full_name,
            this: Some(instance.as_mut()),
            args: &args,
            console: &mut console,
        };
        let set_status = device.methods_named("SetStatus").next().unwrap();
        assert!(component.call(device, set_status, &mut frame).is_err());
    }
}

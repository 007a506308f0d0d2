/// Builds a [`RowData`](crate::RowData) literal.
///
/// ```
/// use rowgate::row;
///
/// let data = row! {
///     "name" => "Jane",
///     "email" => "jane@example.com",
/// };
/// assert_eq!(data["name"].as_str(), Some("Jane"));
/// ```
#[macro_export]
macro_rules! row {
    () => { $crate::RowData::new() };
    ( $( $column:expr => $value:expr ),+ $(,)? ) => {{
        let mut data = $crate::RowData::new();
        $( data.insert($column.into(), $crate::stmt::Value::from($value)); )+
        data
    }};
}

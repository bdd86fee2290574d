/// Test fixtures: representative XML payloads from the DHMZ feeds.
///
/// Trimmed to a handful of stations but structurally complete. They follow
/// the documents served at:
///   https://vrijeme.hr/hrvatska_n.xml   (general weather, row-based)
///   https://vrijeme.hr/uvi.xml          (UV index, city-grouped)
///   https://vrijeme.hr/more_n.xml       (sea temperature, city-grouped)
///
/// Slots for hours that have not happened yet are present but empty. The
/// reading selector has to skip past them to find the current value.

/// General weather: `DatumTermin` stamp, then a header row of labels and
/// one row per station.
#[cfg(test)]
pub(crate) fn fixture_general_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<Hrvatska>
  <DatumTermin>
    <Datum>19.10.2026</Datum>
    <Termin>14</Termin>
  </DatumTermin>
  <Podatci>
    <Termin>Temp</Termin>
    <Termin>Vlaga</Termin>
    <Termin>Tlak</Termin>
    <Termin>VjetarSmjer</Termin>
    <Termin>VjetarBrzina</Termin>
    <Termin>Vrijeme</Termin>
  </Podatci>
  <Podatci>
    <Postaja>Malinska</Postaja>
    <Termin>17.4</Termin>
    <Termin>71</Termin>
    <Termin>1017.2</Termin>
    <Termin>SW</Termin>
    <Termin>2.1</Termin>
    <Termin>pretežno vedro</Termin>
  </Podatci>
  <Podatci>
    <Postaja>Split</Postaja>
    <Termin>21.0</Termin>
    <Termin>55</Termin>
    <Termin>1015.8</Termin>
    <Termin>SE</Termin>
    <Termin>4.3</Termin>
    <Termin>sunčano</Termin>
  </Podatci>
  <Podatci>
    <Postaja>Zagreb</Postaja>
    <Termin>12.9</Termin>
    <Termin>80</Termin>
    <Termin>1019.0</Termin>
    <Termin>N</Termin>
    <Termin>1.0</Termin>
    <Termin>oblačno</Termin>
  </Podatci>
</Hrvatska>"#
}

/// UV index, two-hourly slots; afternoon slots still empty.
#[cfg(test)]
pub(crate) fn fixture_uv_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<UVI>
  <Grad>
    <GradIme>Zagreb</GradIme>
    <Podatci>
      <t08>1.2</t08>
      <t10>3.0</t10>
      <t12/>
      <t14/>
      <t16/>
    </Podatci>
  </Grad>
  <Grad>
    <GradIme>Malinska</GradIme>
    <Podatci>
      <t08>2.1</t08>
      <t10>4.6</t10>
      <t12>6.3</t12>
      <t14></t14>
      <t16/>
    </Podatci>
  </Grad>
  <Grad>
    <GradIme>Split</GradIme>
    <Podatci>
      <t08/>
      <t10/>
      <t12/>
      <t14/>
      <t16/>
    </Podatci>
  </Grad>
</UVI>"#
}

/// Sea temperature at the standard observation hours.
#[cfg(test)]
pub(crate) fn fixture_sea_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<More>
  <Grad>
    <GradIme>Malinska</GradIme>
    <Podatci>
      <t07>19.8</t07>
      <t14>20.6</t14>
      <t21/>
    </Podatci>
  </Grad>
  <Grad>
    <GradIme>Split</GradIme>
    <Podatci>
      <t07>21.2</t07>
      <t14/>
      <t21/>
    </Podatci>
  </Grad>
</More>"#
}

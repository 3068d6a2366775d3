#![allow(dead_code)]

use lopdf::{Object, Stream, dictionary};

/// A data row: moves down one line and shows `fields` as one `TJ` array
/// with column-wide kerning between them.
pub fn row(fields: &[&str]) -> String {
    let shown: Vec<String> = fields.iter().map(|f| format!("({})", f)).collect();
    format!("0 -11 TD [{}]TJ\n", shown.join("-2000"))
}

/// A section name line starting a new text block.
pub fn section(y: u32, name_ops: &str) -> String {
    format!("1 0 0 1 30 {} Tm {}\n", y, name_ops)
}

/// Content stream of one municipality page for ATLANTIC / ABSECON,
/// July 2023 - June 2024.
///
/// The stream carries the quirks seen in generated reports: a number split
/// at its comma by kerning, digits drawn with wide character spacing that a
/// matching displacement cancels, section names spread over several
/// fragments and a `- -` placeholder.
pub fn absecon_page(resolutions_name: &str) -> Vec<u8> {
    let mut s = String::from("BT\n/F1 9 Tf\n1 0 0 1 200 750 Tm\n");
    s += "(MUNICIPAL COURT STATISTICS)Tj\n";
    s += "2.1882 -1.4941 TD\n(JULY 2023 - JUNE 2024)Tj\n";
    s += "3.0706 -1.4941 TD\n(ATLANTIC)Tj\n";
    s += "-.0118 -1.4941 TD\n(ABSECON)Tj\n";

    // Rotated column headers.
    s += "0 8.52 -8.52 0 101.52 285.96 Tm\n[(D.P. &)-3012.9(Other)-2811.9(Criminal)]TJ\n";
    s += "1 0 0 1 150 640 Tm\n";
    s += "[(Indictables)-2000(P.D.P.)-2000(Criminal)-2000(Total)-2000(DWI)-2000(Moving)-2000(Parking)-2000(Total)-2000(Total)]TJ\n";

    s += &section(620, "(Filings)Tj");
    s += "0 -11 TD [(Jul 2022 - Jun 2023)-2000(434)-2000(385)-2000(77)-2000(896)-2000(33)-2000(2)-900(339)-2000(56)-2000(2,428)-2000(3,324)]TJ\n";
    s += &row(&["Jul 2023 - Jun 2024", "232", "410", "63", "705", "41", "2,510", "58", "2,609", "3,314"]);
    s += &row(&["% Change", "-47%", "6%", "-18%", "-21%", "24%", "7%", "4%", "7%", "0%"]);

    s += &section(570, &format!("({})Tj", resolutions_name));
    s += "0 -11 TD (Jul 2022 - Jun 2023)Tj\n";
    s += "0.9 Tc\n[(4)900(3)900(9)-1500(3)900(7)900(0)]TJ\n0 Tc\n";
    s += "[(80)-2000(889)-2000(30)-2000(2,200)-2000(50)-2000(2,280)-2000(3,169)]TJ\n";
    s += &row(&["Jul 2023 - Jun 2024", "300", "360", "70", "730", "35", "2,400", "52", "2,487", "3,217"]);
    s += &row(&["% Change", "-32%", "-3%", "-13%", "-25%", "17%", "9%", "4%", "9%", "2%"]);

    s += &section(520, "(Clearance)Tj");
    s += &row(&["Jul 2022 - Jun 2023", "5", "-15", "3", "-7", "-3", "-120", "-6", "-129", "-136"]);
    s += "0 -11 TD [(Jul 2023 - Jun 2024)-2000(68)-2000(-50)-2000(7)-2000(25)-2000(-6)-2000(-1)-1200(040)-2000(-6)-2000(-1,052)-2000(-220)]TJ\n";

    s += &section(480, "[(Clearance)-800(Percent)]TJ");
    s += &row(&["Jul 2022 - Jun 2023", "101%", "96%", "104%", "99%", "91%", "95%", "89%", "95%", "96%"]);
    s += &row(&["Jul 2023 - Jun 2024", "129%", "88%", "111%", "104%", "85%", "96%", "235%", "97%", "99%"]);

    s += &section(440, "(Backlog)Tj");
    s += "0 -11 TD [(Jun 2023)-4000(0)-4000(8)0(8)-4704.6(2)0(3)-4000(111)-4000(9)-4000(180)-4000(18)-4000(207)-4000(318)]TJ\n";
    s += &row(&["Jun 2024", "0", "68", "20", "88", "12", "150", "15", "177", "265"]);
    s += &row(&["% Change", "- -", "-23%", "-13%", "-21%", "33%", "-17%", "-17%", "-14%", "-17%"]);

    s += &section(390, "[(Backlog/100)-600(Mthly)-600(Filings)]TJ");
    s += &row(&["Jun 2023", "0", "274", "358", "149", "327", "92", "579", "102", "115"]);
    s += &row(&["Jun 2024", "0", "199", "381", "150", "351", "72", "93", "81", "96"]);
    s += &row(&["% Change", "- -", "-27%", "6%", "1%", "7%", "-22%", "-84%", "-21%", "-17%"]);

    s += &section(340, "[(Backlog)-700(Percent)]TJ");
    s += &row(&["Jun 2023", "0%", "77%", "53%", "70%", "60%", "45%", "36%", "46%", "52%"]);
    s += &row(&["Jun 2024", "0%", "71%", "44%", "64%", "52%", "33%", "25%", "35%", "40%"]);

    s += &section(300, "[(Active)-700(Pending)]TJ");
    s += &row(&["Jun 2023", "0", "115", "43", "158", "15", "400", "50", "465", "623"]);
    s += "0 -11 TD [(Jun 2024)-2000(0)-2000(9)0(6)-2000(2)0(5)-2000(121)-2000(28)-2000(560)-2000(68)-2000(656)-2000(777)]TJ\n";
    s += &row(&["% Change", "- -", "-17%", "-42%", "-23%", "90%", "40%", "36%", "41%", "22%"]);

    s += "ET\n";
    s.into_bytes()
}

/// A cover page: same title, no table.
pub fn cover_page() -> Vec<u8> {
    b"BT\n1 0 0 1 200 750 Tm\n(MUNICIPAL COURT STATISTICS)Tj\n0 -20 Td\n(Statewide Summary)Tj\nET\n"
        .to_vec()
}

/// A page that claims table data but stops after the first section name.
pub fn truncated_page() -> Vec<u8> {
    let page = String::from_utf8(absecon_page("Resolutions")).unwrap();
    let cut = page.find("0 -11 TD").unwrap();
    format!("{}ET\n", &page[..cut]).into_bytes()
}

/// A page whose second section is not where the layout puts it.
pub fn out_of_order_page() -> Vec<u8> {
    let page = String::from_utf8(absecon_page("Resolutions")).unwrap();
    page.replacen("(Resolutions)Tj", "(Backlog)Tj", 1).into_bytes()
}

/// Build a PDF with one page per content stream.
pub fn pdf_with_pages(pages: &[Vec<u8>]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources = dictionary! {
        "Font" => dictionary! {
            "F1" => Object::Reference(font_id),
        },
    };

    let mut page_ids = Vec::new();
    for content in pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.clone()));
        let media_box = vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ];
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => media_box,
            "Contents" => Object::Reference(content_id),
            "Resources" => resources.clone(),
        });
        page_ids.push(page_id);
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.iter().map(|&id| Object::Reference(id)).collect::<Vec<_>>(),
        "Count" => Object::Integer(page_ids.len() as i64),
    };
    let pages_id = doc.add_object(pages_dict);

    for &page_id in &page_ids {
        if let Ok(page_obj) = doc.get_object_mut(page_id) {
            if let Ok(dict) = page_obj.as_dict_mut() {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}
